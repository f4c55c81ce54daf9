//! Statistics panels, loaded as one all-or-nothing join.

use parking_lot::RwLock;
use registry_core::{AgeGroupCount, ClientError, GenderCount, StatisticsView, StatusCount};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::request::RequestClient;

pub const GENDER_PATH: &str = "/api/statistics/population-by-gender";
pub const AGE_PATH: &str = "/api/statistics/population-by-age";
pub const FEEDBACK_STATUS_PATH: &str = "/api/statistics/feedbacks-by-status";

#[derive(Clone)]
pub struct StatisticsLoader {
    client: RequestClient,
    view: Arc<RwLock<Option<StatisticsView>>>,
}

impl StatisticsLoader {
    pub fn new(client: RequestClient) -> Self {
        Self { client, view: Arc::new(RwLock::new(None)) }
    }

    /// Renders only when all three requests succeed; otherwise the previous
    /// view stays and the first error is returned. Every request runs to
    /// completion, so each failure posts its own notice.
    pub async fn load(&self) -> Result<StatisticsView, ClientError> {
        let (gender, age, feedback) = tokio::join!(
            self.client.get_json::<Vec<GenderCount>>(GENDER_PATH),
            self.client.get_json::<Vec<AgeGroupCount>>(AGE_PATH),
            self.client.get_json::<Vec<StatusCount>>(FEEDBACK_STATUS_PATH),
        );

        match (gender, age, feedback) {
            (Ok(gender), Ok(age), Ok(feedback)) => {
                let view = StatisticsView::render(&gender, &age, &feedback);
                debug!("Statistics rendered");
                *self.view.write() = Some(view.clone());
                Ok(view)
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                warn!(error = %e, "Statistics load failed, keeping previous panels");
                Err(e)
            }
        }
    }

    pub fn view(&self) -> Option<StatisticsView> {
        self.view.read().clone()
    }
}
