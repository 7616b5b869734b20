use crate::indexed::Indexed;
use serde::{Deserialize, Serialize};

/// A school record.
///
/// The `id` is assigned by the entity store on first persist and is `None`
/// before creation. `classrooms` is populated only by the eager fetch paths;
/// write paths ignore it (the classroom owns the foreign key).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: Option<i64>,
    pub name: Option<String>,
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
}

/// A classroom record. Holds the owning side of the school relation
/// as an explicit `school_id` foreign key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub school_id: Option<i64>,
}

// Identity-based equality: two records are equal iff both carry a
// store-assigned id and the ids match. A record that has not been persisted
// yet (id = None) never compares equal, not even to a copy of itself.
impl PartialEq for School {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl PartialEq for Classroom {
    fn eq(&self, other: &Self) -> bool {
        matches!((self.id, other.id), (Some(a), Some(b)) if a == b)
    }
}

impl School {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            classrooms: Vec::new(),
        }
    }
}

impl Classroom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            school_id: None,
        }
    }
}

impl Indexed for School {
    const INDEX: &'static str = "school";

    fn id(&self) -> Option<i64> {
        self.id
    }
}

impl Indexed for Classroom {
    const INDEX: &'static str = "classroom";

    fn id(&self) -> Option<i64> {
        self.id
    }
}
