//! [`SpotBackend`] over HTTP.

use anyhow::{bail, Context};
use protocol::{
    spot_detail_segments, ErrorBody, HotspotsRequest, HotspotsResponse, SessionToken,
    SpotDetailResponse, HOTSPOTS_PATH,
};
use reqwest::Url;
use serde::de::DeserializeOwned;
use session::{BackendError, BoxFuture, SpotBackend};
use tracing::debug;

pub struct HttpBackend {
    base: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base).with_context(|| format!("invalid backend url {base:?}"))?;
        if base.cannot_be_a_base() {
            bail!("backend url {base} cannot carry a path");
        }
        Ok(Self {
            base,
            client: reqwest::Client::new(),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn hotspots_url(&self) -> Url {
        self.endpoint(HOTSPOTS_PATH.split('/').filter(|s| !s.is_empty()))
    }

    fn detail_url(&self, token: &str, spot_id: &str) -> Url {
        self.endpoint(spot_detail_segments(token, spot_id))
    }
}

impl SpotBackend for HttpBackend {
    fn fetch_hotspots(
        &self,
        request: HotspotsRequest,
    ) -> BoxFuture<'_, Result<HotspotsResponse, BackendError>> {
        let url = self.hotspots_url();
        Box::pin(async move {
            debug!(%url, label = %request.origin.label, "POST hotspots");
            let resp = self
                .client
                .post(url)
                .json(&request)
                .send()
                .await
                .map_err(|e| BackendError::Transport(e.to_string()))?;
            decode(resp).await
        })
    }

    fn fetch_spot_detail(
        &self,
        token: SessionToken,
        spot_id: String,
    ) -> BoxFuture<'_, Result<SpotDetailResponse, BackendError>> {
        let url = self.detail_url(&token, &spot_id);
        Box::pin(async move {
            debug!(%url, "GET spot detail");
            let resp = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| BackendError::Transport(e.to_string()))?;
            decode(resp).await
        })
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, BackendError> {
    let status = resp.status();
    let body = resp
        .bytes()
        .await
        .map_err(|e| BackendError::Transport(e.to_string()))?;

    if !status.is_success() {
        let message = serde_json::from_slice::<ErrorBody>(&body)
            .ok()
            .map(|b| b.error);
        return Err(BackendError::Status {
            status: status.as_u16(),
            message,
        });
    }
    serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()))
}
