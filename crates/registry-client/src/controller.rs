//! Generic CRUD controller, one instance per resource.
//!
//! A mutation that succeeds is always followed by a full reload of the list.
//! A failed load keeps whatever was rendered before.

use parking_lot::RwLock;
use registry_core::{
    ClientError, ConfirmGate, Feedback, FormValues, Household, ListView, Person, Resource, RowView,
};
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::request::RequestClient;

struct ListState<R> {
    items: Vec<R>,
    view: Option<ListView>,
}

#[derive(Clone)]
pub struct ResourceController<R: Resource> {
    client: RequestClient,
    state: Arc<RwLock<ListState<R>>>,
}

impl<R: Resource> ResourceController<R> {
    pub fn new(client: RequestClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(ListState { items: Vec::new(), view: None })),
        }
    }

    /// Fetch the collection without touching the rendered list.
    pub async fn fetch_all(&self) -> Result<Vec<R>, ClientError> {
        self.client.get_json::<Vec<R>>(R::BASE_PATH).await
    }

    pub async fn list(&self) -> Result<Vec<R>, ClientError> {
        match self.fetch_all().await {
            Ok(items) => {
                let view = ListView::render(&items);
                debug!(path = R::BASE_PATH, count = items.len(), "List rendered");
                let mut state = self.state.write();
                state.items = items.clone();
                state.view = Some(view);
                Ok(items)
            }
            Err(e) => {
                warn!(path = R::BASE_PATH, error = %e, "Load failed, keeping previous list");
                Err(e)
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<R, ClientError> {
        let path = self.editable_path("get", id)?;
        self.client.get_json::<R>(&path).await
    }

    /// Form values populated from the item's DTO, for an edit modal.
    pub async fn fetch_form(&self, id: &str) -> Result<FormValues, ClientError> {
        let path = self.editable_path("get", id)?;
        let dto = self.client.request(Method::GET, &path, None).await?;
        Ok(FormValues::from_dto(R::FIELDS, &dto))
    }

    /// POST without an edit id, PUT with one. Returns the server's reply as-is.
    pub async fn upsert(&self, form: &FormValues, edit_id: Option<&str>) -> Result<Value, ClientError> {
        let payload = form.to_payload(R::FIELDS);
        let (method, path, message) = match edit_id {
            Some(id) => (
                Method::PUT,
                self.editable_path("update", id)?,
                format!("Cập nhật {} thành công", R::NOUN),
            ),
            None => (
                Method::POST,
                R::BASE_PATH.to_string(),
                format!("Thêm {} thành công", R::NOUN),
            ),
        };

        let reply = self.client.request(method, &path, Some(&payload)).await?;
        info!(path = %path, "Saved {}", R::NOUN);
        self.client.notices().success(message);
        self.reload().await;
        Ok(reply)
    }

    /// `Ok(false)` when the gate declines; no request is sent then.
    pub async fn remove(&self, id: &str, gate: &dyn ConfirmGate) -> Result<bool, ClientError> {
        if !gate.confirm(&Self::confirm_prompt()) {
            debug!(path = R::BASE_PATH, id, "Delete cancelled");
            return Ok(false);
        }

        let path = R::item_path(id);
        self.client.request(Method::DELETE, &path, None).await?;
        info!(path = %path, "Deleted {}", R::NOUN);
        self.client
            .notices()
            .success(format!("Xóa {} thành công", R::NOUN));
        self.reload().await;
        Ok(true)
    }

    pub fn confirm_prompt() -> String {
        format!("Bạn có chắc chắn muốn xóa {} này?", R::NOUN)
    }

    /// Last rendered list; `None` until a load succeeds.
    pub fn view(&self) -> Option<ListView> {
        self.state.read().view.clone()
    }

    pub fn items(&self) -> Vec<R> {
        self.state.read().items.clone()
    }

    pub fn search(&self, term: &str) -> Vec<RowView> {
        self.state
            .read()
            .view
            .as_ref()
            .map(|view| view.filter(term).into_iter().cloned().collect())
            .unwrap_or_default()
    }

    async fn reload(&self) {
        // failure already logged and notified; the stale list stays
        let _ = self.list().await;
    }

    fn editable_path(&self, operation: &'static str, id: &str) -> Result<String, ClientError> {
        let path = R::item_path(id);
        if !R::EDITABLE {
            return Err(ClientError::Unsupported { operation, path });
        }
        Ok(path)
    }
}

impl ResourceController<Feedback> {
    pub async fn accept(&self, id: &str) -> Result<Value, ClientError> {
        self.moderate(Method::PUT, id, "accept", None, "Đã tiếp nhận phản ánh")
            .await
    }

    pub async fn reject(&self, id: &str) -> Result<Value, ClientError> {
        self.moderate(Method::PUT, id, "reject", None, "Đã từ chối phản ánh")
            .await
    }

    pub async fn reply(&self, id: &str, message: &str) -> Result<Value, ClientError> {
        let body = json!({ "message": message });
        self.moderate(Method::POST, id, "reply", Some(&body), "Đã gửi phản hồi")
            .await
    }

    async fn moderate(
        &self,
        method: Method,
        id: &str,
        action: &str,
        body: Option<&Value>,
        notice: &str,
    ) -> Result<Value, ClientError> {
        let path = format!("{}/{}", Feedback::item_path(id), action);
        let reply = self.client.request(method, &path, body).await?;
        info!(path = %path, "Feedback moderated");
        self.client.notices().success(notice);
        self.reload().await;
        Ok(reply)
    }
}

/// Endpoints scoped to the signed-in resident.
#[derive(Clone)]
pub struct SelfService {
    client: RequestClient,
}

impl SelfService {
    pub const HOUSEHOLD_PATH: &'static str = "/api/my/household";
    pub const PERSON_PATH: &'static str = "/api/my/person";
    pub const FEEDBACKS_PATH: &'static str = "/api/my/feedbacks";

    pub fn new(client: RequestClient) -> Self {
        Self { client }
    }

    pub async fn my_household(&self) -> Result<Household, ClientError> {
        self.client.get_json(Self::HOUSEHOLD_PATH).await
    }

    pub async fn my_person(&self) -> Result<Person, ClientError> {
        self.client.get_json(Self::PERSON_PATH).await
    }

    pub async fn my_feedbacks(&self) -> Result<Vec<Feedback>, ClientError> {
        self.client.get_json(Self::FEEDBACKS_PATH).await
    }
}
