//! In-memory doubles for the store and index seams, plus request helpers
//! for driving the router directly.
#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use core_types::{Classroom, Indexed, School};
use database::{ClassroomStore, DbError, SchoolStore};
use search_index::{SearchError, SearchIndex};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;
use web_server::{AppState, build_router};

/// An in-memory stand-in for the Postgres repository: one struct holding
/// both tables, implementing both store contracts, ids from one sequence.
#[derive(Default)]
pub struct MemoryStore {
    schools: Mutex<HashMap<i64, School>>,
    classrooms: Mutex<HashMap<i64, Classroom>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            schools: Mutex::new(HashMap::new()),
            classrooms: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn school_count(&self) -> usize {
        self.schools.lock().unwrap().len()
    }

    pub fn classroom_count(&self) -> usize {
        self.classrooms.lock().unwrap().len()
    }

    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    fn classrooms_of(&self, school_id: i64) -> Vec<Classroom> {
        let mut rooms: Vec<Classroom> = self
            .classrooms
            .lock()
            .unwrap()
            .values()
            .filter(|room| room.school_id == Some(school_id))
            .cloned()
            .collect();
        rooms.sort_by_key(|room| room.id);
        rooms
    }
}

#[async_trait]
impl SchoolStore for MemoryStore {
    async fn create(&self, school: School) -> Result<School, DbError> {
        if school.id.is_some() {
            return Err(DbError::IdAlreadyAssigned);
        }
        let stored = School {
            id: Some(self.assign_id()),
            classrooms: Vec::new(),
            ..school
        };
        self.schools
            .lock()
            .unwrap()
            .insert(stored.id.unwrap(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, school: School) -> Result<School, DbError> {
        let id = school.id.ok_or(DbError::MissingId)?;
        let stored = School {
            classrooms: Vec::new(),
            ..school
        };
        self.schools.lock().unwrap().insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<School>, DbError> {
        let school = self.schools.lock().unwrap().get(&id).cloned();
        Ok(school.map(|school| School {
            classrooms: self.classrooms_of(id),
            ..school
        }))
    }

    async fn find_all_eager(&self) -> Result<Vec<School>, DbError> {
        let mut schools: Vec<School> = self.schools.lock().unwrap().values().cloned().collect();
        schools.sort_by_key(|school| school.id);
        Ok(schools
            .into_iter()
            .map(|school| {
                let classrooms = school.id.map(|id| self.classrooms_of(id)).unwrap_or_default();
                School { classrooms, ..school }
            })
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbError> {
        self.schools.lock().unwrap().remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ClassroomStore for MemoryStore {
    async fn create(&self, classroom: Classroom) -> Result<Classroom, DbError> {
        if classroom.id.is_some() {
            return Err(DbError::IdAlreadyAssigned);
        }
        let stored = Classroom {
            id: Some(self.assign_id()),
            ..classroom
        };
        self.classrooms
            .lock()
            .unwrap()
            .insert(stored.id.unwrap(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, classroom: Classroom) -> Result<Classroom, DbError> {
        let id = classroom.id.ok_or(DbError::MissingId)?;
        self.classrooms.lock().unwrap().insert(id, classroom.clone());
        Ok(classroom)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Classroom>, DbError> {
        Ok(self.classrooms.lock().unwrap().get(&id).cloned())
    }

    async fn find_all_eager(&self) -> Result<Vec<Classroom>, DbError> {
        let mut rooms: Vec<Classroom> =
            self.classrooms.lock().unwrap().values().cloned().collect();
        rooms.sort_by_key(|room| room.id);
        Ok(rooms)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DbError> {
        self.classrooms.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn find_for_school(&self, school_id: i64) -> Result<Vec<Classroom>, DbError> {
        Ok(self.classrooms_of(school_id))
    }
}

/// An in-memory search index double. Matches `id:N` expressions against the
/// document key and bare terms as substrings of any string field. Flip
/// `offline` to make every call fail the way an unreachable node would.
pub struct MemoryIndex<T> {
    docs: Mutex<HashMap<i64, T>>,
    save_calls: AtomicUsize,
    offline: AtomicBool,
}

impl<T> MemoryIndex<T> {
    pub fn new() -> Self {
        Self {
            docs: Mutex::new(HashMap::new()),
            save_calls: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
        }
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn doc_count(&self) -> usize {
        self.docs.lock().unwrap().len()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), SearchError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(SearchError::IndexError {
                status: 500,
                body: "index offline".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn matches<T: Indexed + Serialize>(record: &T, query: &str) -> bool {
    if let Some(id) = query.strip_prefix("id:") {
        return id.parse::<i64>().ok() == record.id();
    }
    match serde_json::to_value(record) {
        Ok(Value::Object(fields)) => fields
            .values()
            .any(|value| matches!(value, Value::String(s) if s.contains(query))),
        _ => false,
    }
}

#[async_trait]
impl<T> SearchIndex<T> for MemoryIndex<T>
where
    T: Indexed + Serialize + Clone + Send + Sync,
{
    async fn save(&self, record: &T) -> Result<(), SearchError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        let id = record.id().ok_or(SearchError::MissingId)?;
        self.docs.lock().unwrap().insert(id, record.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), SearchError> {
        self.check_online()?;
        self.docs.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<T>, SearchError> {
        self.check_online()?;
        let docs = self.docs.lock().unwrap();
        let mut ids: Vec<i64> = docs.keys().copied().collect();
        ids.sort_unstable();
        Ok(ids
            .into_iter()
            .filter_map(|id| docs.get(&id))
            .filter(|doc| matches(*doc, query))
            .cloned()
            .collect())
    }
}

/// The router plus handles on its doubles, so tests can assert against the
/// store and index state behind the HTTP surface.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub school_index: Arc<MemoryIndex<School>>,
    pub classroom_index: Arc<MemoryIndex<Classroom>>,
}

pub fn test_app() -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let school_index = Arc::new(MemoryIndex::<School>::new());
    let classroom_index = Arc::new(MemoryIndex::<Classroom>::new());

    let state = Arc::new(AppState {
        schools: store.clone(),
        classrooms: store.clone(),
        school_index: school_index.clone(),
        classroom_index: classroom_index.clone(),
    });

    TestApp {
        router: build_router(state),
        store,
        school_index,
        classroom_index,
    }
}

/// Sends one request through the router and returns status, headers and the
/// decoded JSON body (`Value::Null` for empty bodies).
pub async fn request(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    let req = if let Some(payload) = body {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        builder
            .body(Body::from(serde_json::to_vec(&payload).unwrap()))
            .unwrap()
    } else {
        builder.body(Body::empty()).unwrap()
    };

    let response = router.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();

    let parsed = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, parsed)
}
