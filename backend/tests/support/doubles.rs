//! Recording doubles for the driven ports behind the HTTP surface.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wedding_backend::domain::MediaAsset;
use wedding_backend::domain::ports::{
    DestroyResult, EmailMessage, MediaHost, MediaHostError, Notifier, NotifierError,
};

use crate::recording_double_macro::recording_double;

recording_double! {
    /// Configurable success or failure outcome for RecordingNotifier.
    pub(crate) enum NotifierResponse {
        Ok(()),
        Err(NotifierError),
    }

    /// Captures every outbound email instead of sending it.
    pub(crate) struct RecordingNotifier {
        calls: EmailMessage,
        trait: Notifier,
        method: send(&self, message: &EmailMessage) -> Result<(), NotifierError>,
        record: message.clone(),
        calls_lock: "notifier calls lock",
        response_lock: "notifier response lock",
    }
}

impl RecordingNotifier {
    /// Recipients of every captured message, in send order.
    pub(crate) fn recipients(&self) -> Vec<Vec<String>> {
        self.calls().into_iter().map(|message| message.to).collect()
    }
}

#[derive(Default)]
struct MediaHostState {
    images: Vec<MediaAsset>,
    failing: HashSet<String>,
    list_calls: Vec<String>,
    destroy_calls: Vec<String>,
}

/// In-memory media host that records calls and fails chosen identifiers.
///
/// Listings keep returning destroyed images, like a host whose index lags
/// behind deletions.
#[derive(Clone, Default)]
pub(crate) struct RecordingMediaHost {
    state: Arc<Mutex<MediaHostState>>,
}

impl RecordingMediaHost {
    pub(crate) fn with_images(public_ids: &[&str]) -> Self {
        let host = Self::default();
        host.state.lock().expect("media host lock").images =
            public_ids.iter().map(|id| asset(id)).collect();
        host
    }

    /// Make every future destroy of `public_id` answer `"not found"`.
    pub(crate) fn fail_destroy(&self, public_id: &str) {
        self.state
            .lock()
            .expect("media host lock")
            .failing
            .insert(public_id.to_owned());
    }

    pub(crate) fn destroy_calls(&self) -> Vec<String> {
        self.state
            .lock()
            .expect("media host lock")
            .destroy_calls
            .clone()
    }

    pub(crate) fn remote_calls(&self) -> usize {
        let state = self.state.lock().expect("media host lock");
        state.list_calls.len() + state.destroy_calls.len()
    }
}

pub(crate) fn asset(public_id: &str) -> MediaAsset {
    MediaAsset {
        id: public_id.rsplit('/').next().unwrap_or(public_id).to_owned(),
        url: format!("https://res.example.com/image/upload/{public_id}.jpg"),
        width: Some(1600),
        height: Some(1067),
        created_at: None,
        public_id: public_id.to_owned(),
    }
}

#[async_trait]
impl MediaHost for RecordingMediaHost {
    async fn list(&self, folder: &str) -> Result<Vec<MediaAsset>, MediaHostError> {
        let mut state = self.state.lock().expect("media host lock");
        state.list_calls.push(folder.to_owned());
        Ok(state.images.clone())
    }

    async fn destroy(&self, public_id: &str) -> Result<DestroyResult, MediaHostError> {
        let mut state = self.state.lock().expect("media host lock");
        state.destroy_calls.push(public_id.to_owned());
        if state.failing.contains(public_id) {
            return Ok(DestroyResult {
                result: "not found".to_owned(),
            });
        }
        Ok(DestroyResult::ok())
    }
}
