//! Todo entity (database row mapping).

use sqlx::FromRow;

use domain::models::Todo;

/// Database row mapping for the todos table.
#[derive(Debug, Clone, FromRow)]
pub struct TodoEntity {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<TodoEntity> for Todo {
    fn from(entity: TodoEntity) -> Self {
        Self {
            id: Some(entity.id),
            title: entity.title,
            description: entity.description,
            completed: entity.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;

    #[test]
    fn test_entity_into_domain_keeps_fields() {
        let description: String = Sentence(3..8).fake();
        let entity = TodoEntity {
            id: 12,
            title: "Buy milk".to_string(),
            description: Some(description.clone()),
            completed: true,
        };

        let todo: Todo = entity.into();

        assert_eq!(todo.id, Some(12));
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, Some(description));
        assert!(todo.completed);
    }

    #[test]
    fn test_entity_without_description() {
        let entity = TodoEntity {
            id: 1,
            title: "Call mom".to_string(),
            description: None,
            completed: false,
        };

        let todo: Todo = entity.into();
        assert!(todo.description.is_none());
    }
}
