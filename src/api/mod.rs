// HTTP client for the comparison backend.
//
// One `ApiClient` per run, bound to a sport domain: the configured server
// origin plus the domain's API prefix. Every request is attempted exactly
// once with a bounded timeout; retries are deliberately absent.

pub mod types;

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

use crate::sport::{Sport, StatsType};
use types::{
    Accolades, AthleteDetails, CompareRequest, CompareResult, FighterInfo, FighterRecord,
    FighterStats, RawSearchResult, SearchResult, SeasonStat,
};

pub type ApiResult<T> = Result<T, ApiError>;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}: {body}")]
    Http {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Typed client for one sport domain of the backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    sport: Sport,
}

impl ApiClient {
    /// Build a client for `sport` rooted at `origin` (no trailing slash).
    pub fn new(origin: &str, sport: Sport, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("matchup/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(ApiError::Build)?;
        Ok(ApiClient {
            http,
            base: format!("{}{}", origin, sport.base_path()),
            sport,
        })
    }

    /// Search athletes by name fragment.
    ///
    /// Rows without a usable identifier are dropped with a warning rather
    /// than surfaced; the backend occasionally emits them and they cannot
    /// be selected anyway.
    pub async fn search(&self, query: &str) -> ApiResult<Vec<SearchResult>> {
        let raw: Vec<RawSearchResult> = self
            .get_json("/search", &[("q", query.to_string())])
            .await?;

        let mut results = Vec::with_capacity(raw.len());
        for row in raw {
            let name = row.name.clone();
            match row.normalize() {
                Some(result) => results.push(result),
                None => warn!(%name, "dropping search row without usable id"),
            }
        }
        Ok(results)
    }

    /// Season lines for one NBA athlete, filtered by the backend per `stats_type`.
    pub async fn season_stats(&self, id: u64, stats_type: StatsType) -> ApiResult<Vec<SeasonStat>> {
        self.get_json(
            &format!("/athletes/{id}/season-stats"),
            &[("type", stats_type.code().to_string())],
        )
        .await
    }

    /// Accolades for one NBA athlete.
    pub async fn accolades(&self, id: u64) -> ApiResult<Accolades> {
        self.get_json(&format!("/athletes/{id}/accolades"), &[]).await
    }

    /// Bio for one fighter.
    pub async fn fighter_info(&self, id: u64) -> ApiResult<FighterInfo> {
        self.get_json(&format!("/fighters/{id}/info"), &[]).await
    }

    /// Per-15-minute stats for one fighter.
    pub async fn fighter_stats(&self, id: u64) -> ApiResult<FighterStats> {
        self.get_json(&format!("/fighters/{id}/stats"), &[]).await
    }

    /// Win/loss record for one fighter.
    pub async fn fighter_record(&self, id: u64) -> ApiResult<FighterRecord> {
        self.get_json(&format!("/fighters/{id}/record"), &[]).await
    }

    /// All detail requests for one athlete, fanned out concurrently and
    /// joined all-or-nothing. Returns `None` for the general domain, which
    /// has no detail endpoints.
    pub async fn athlete_details(
        &self,
        id: u64,
        stats_type: StatsType,
    ) -> ApiResult<Option<AthleteDetails>> {
        match self.sport {
            Sport::General => Ok(None),
            Sport::Nba => {
                let (seasons, accolades) =
                    tokio::try_join!(self.season_stats(id, stats_type), self.accolades(id))?;
                Ok(Some(AthleteDetails::Nba { seasons, accolades }))
            }
            Sport::Mma => {
                let (info, stats, record) = tokio::try_join!(
                    self.fighter_info(id),
                    self.fighter_stats(id),
                    self.fighter_record(id)
                )?;
                Ok(Some(AthleteDetails::Mma {
                    info,
                    stats,
                    record,
                }))
            }
        }
    }

    /// Submit both athletes for comparison.
    pub async fn compare(&self, request: &CompareRequest) -> ApiResult<CompareResult> {
        let url = format!("{}/compare", self.base);
        let response = self
            .http
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { url, status, body });
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode { url, source: e })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base, path);
        let mut builder = self.http.get(&url);
        if !query.is_empty() {
            builder = builder.query(query);
        }

        let response = builder.send().await.map_err(|e| ApiError::Transport {
            url: url.clone(),
            source: e,
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { url, status, body });
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode { url, source: e })
    }
}

// ---------------------------------------------------------------------------
// Unit tests (mock HTTP server over a local TCP listener)
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// A captured HTTP request: first line plus body.
    #[derive(Debug)]
    struct CapturedRequest {
        request_line: String,
        body: String,
    }

    /// Start a mock server that answers `count` connections with the given
    /// status line and JSON body, capturing each request.
    async fn mock_server(
        count: usize,
        status_line: &'static str,
        body: &'static str,
    ) -> (String, mpsc::UnboundedReceiver<CapturedRequest>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for _ in 0..count {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut socket).await;
                let _ = tx.send(request);

                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.flush().await;
            }
        });

        (format!("http://{addr}"), rx)
    }

    /// Minimal HTTP/1.1 request reader: headers, then Content-Length body.
    async fn read_request(socket: &mut tokio::net::TcpStream) -> CapturedRequest {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(header_end) = find_header_end(&buf) {
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_string();
                let content_length = headers
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())?
                    })
                    .unwrap_or(0);
                let body_start = header_end + 4;
                while buf.len() < body_start + content_length {
                    let n = socket.read(&mut chunk).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }
                let request_line = headers.lines().next().unwrap_or("").to_string();
                let body = String::from_utf8_lossy(
                    &buf[body_start..(body_start + content_length).min(buf.len())],
                )
                .to_string();
                return CapturedRequest { request_line, body };
            }
        }
        CapturedRequest {
            request_line: String::new(),
            body: String::new(),
        }
    }

    fn find_header_end(buf: &[u8]) -> Option<usize> {
        buf.windows(4).position(|w| w == b"\r\n\r\n")
    }

    fn client(origin: &str, sport: Sport) -> ApiClient {
        ApiClient::new(origin, sport, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn search_hits_domain_prefixed_path_with_encoded_query() {
        let (origin, mut rx) = mock_server(1, "HTTP/1.1 200 OK", "[]").await;
        let api = client(&origin, Sport::Mma);

        let results = api.search("jon jones").await.unwrap();
        assert!(results.is_empty());

        let request = rx.recv().await.unwrap();
        assert!(
            request.request_line.starts_with("GET /api/mma/search?q=jon+jones")
                || request.request_line.starts_with("GET /api/mma/search?q=jon%20jones"),
            "unexpected request line: {}",
            request.request_line
        );
    }

    #[tokio::test]
    async fn search_normalizes_ids_and_drops_rows_without_one() {
        let body = r#"[
            { "ID": "42", "name": "Kept Upper" },
            { "athleteId": 7, "name": "Kept Fallback" },
            { "name": "Dropped" }
        ]"#;
        let (origin, _rx) = mock_server(1, "HTTP/1.1 200 OK", body).await;
        let api = client(&origin, Sport::Nba);

        let results = api.search("ke").await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 42);
        assert_eq!(results[0].name, "Kept Upper");
        assert_eq!(results[1].id, 7);
    }

    #[tokio::test]
    async fn search_http_error_is_surfaced() {
        let (origin, _rx) = mock_server(1, "HTTP/1.1 500 Internal Server Error", "boom").await;
        let api = client(&origin, Sport::General);

        let err = api.search("xx").await.unwrap_err();
        match err {
            ApiError::Http { status, body, .. } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Http error, got: {other}"),
        }
    }

    #[tokio::test]
    async fn search_garbage_body_is_decode_error() {
        let (origin, _rx) = mock_server(1, "HTTP/1.1 200 OK", "{not json").await;
        let api = client(&origin, Sport::Nba);

        let err = api.search("xx").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn season_stats_sends_type_query() {
        let (origin, mut rx) = mock_server(1, "HTTP/1.1 200 OK", "[]").await;
        let api = client(&origin, Sport::Nba);

        api.season_stats(99, StatsType::Playoffs).await.unwrap();

        let request = rx.recv().await.unwrap();
        assert!(
            request
                .request_line
                .starts_with("GET /api/nba/athletes/99/season-stats?type=3"),
            "unexpected request line: {}",
            request.request_line
        );
    }

    #[tokio::test]
    async fn compare_posts_json_body_with_content_type() {
        let (origin, mut rx) =
            mock_server(1, "HTTP/1.1 200 OK", r#"{"overallWinner":"A"}"#).await;
        let api = client(&origin, Sport::Nba);

        let request = CompareRequest::new(1, 2, Some(StatsType::Regular));
        let result = api.compare(&request).await.unwrap();
        assert_eq!(result.overall_winner.as_deref(), Some("A"));

        let captured = rx.recv().await.unwrap();
        assert!(captured.request_line.starts_with("POST /api/nba/compare"));
        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert_eq!(body["aID"], 1);
        assert_eq!(body["bID"], 2);
        assert_eq!(body["type"], 2);
    }

    #[tokio::test]
    async fn compare_without_stats_type_omits_field() {
        let (origin, mut rx) = mock_server(1, "HTTP/1.1 200 OK", "{}").await;
        let api = client(&origin, Sport::Mma);

        let request = CompareRequest::new(3, 4, None);
        api.compare(&request).await.unwrap();

        let captured = rx.recv().await.unwrap();
        let body: serde_json::Value = serde_json::from_str(&captured.body).unwrap();
        assert!(!body.as_object().unwrap().contains_key("type"));
    }

    #[tokio::test]
    async fn compare_non_2xx_carries_status_and_body() {
        let (origin, _rx) =
            mock_server(1, "HTTP/1.1 503 Service Unavailable", "analysis backend down").await;
        let api = client(&origin, Sport::General);

        let err = api
            .compare(&CompareRequest::new(1, 2, Some(StatsType::All)))
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("503"), "message should carry status: {message}");
        assert!(
            message.contains("analysis backend down"),
            "message should carry body: {message}"
        );
    }

    #[tokio::test]
    async fn transport_error_when_server_unreachable() {
        // Bind then drop a listener to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = client(&format!("http://{addr}"), Sport::Nba);
        let err = api.search("xx").await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[tokio::test]
    async fn general_domain_has_no_details() {
        let api = client("http://127.0.0.1:1", Sport::General);
        let details = api.athlete_details(5, StatsType::Regular).await.unwrap();
        assert!(details.is_none());
    }

    #[tokio::test]
    async fn nba_details_join_both_requests() {
        // Routes by path: two connections, order unknown because the
        // requests are issued concurrently.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for _ in 0..2 {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut socket).await;
                let body = if request.request_line.contains("season-stats") {
                    r#"[{"season":2020,"type":2,"gp":70,"pts":25.0,"ast":5.0,"reb":6.0,"fgm":9.0,"fga":18.0,"tpm":2.0,"tpa":5.0,"min":34.0}]"#
                } else {
                    r#"{"awards":[{"title":"MVP","year":2020}]}"#
                };
                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });

        let api = client(&format!("http://{addr}"), Sport::Nba);
        let details = api
            .athlete_details(11, StatsType::Regular)
            .await
            .unwrap()
            .expect("nba domain has details");

        match details {
            AthleteDetails::Nba { seasons, accolades } => {
                assert_eq!(seasons.len(), 1);
                assert_eq!(accolades.awards.len(), 1);
            }
            other => panic!("expected NBA details, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn mma_details_fail_together_when_one_request_fails() {
        // Three requests: answer record with a 500, the others with 200.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            for _ in 0..3 {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut socket).await;
                let (status, body) = if request.request_line.contains("/record") {
                    ("HTTP/1.1 500 Internal Server Error", "no record")
                } else {
                    ("HTTP/1.1 200 OK", "{}")
                };
                let response = format!(
                    "{status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
            }
        });

        let api = client(&format!("http://{addr}"), Sport::Mma);
        let err = api
            .athlete_details(8, StatsType::Regular)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { .. }));
    }
}
