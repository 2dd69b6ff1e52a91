//! Request bodies for the `/info` endpoint

use serde::Serialize;

/// Body of a POST to `/info`. Only `type` is mandatory; absent fields are
/// left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoRequest {
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_by_time: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub req: Option<CandleRequest>,
}

/// Nested `req` object of a `candleSnapshot` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandleRequest {
    pub coin: String,
    pub interval: String,
    pub start_time: i64,
    pub end_time: i64,
}

impl InfoRequest {
    pub fn new(request_type: &str) -> Self {
        Self {
            request_type: request_type.to_string(),
            coin: None,
            user: None,
            aggregate_by_time: None,
            start_time: None,
            req: None,
        }
    }

    pub fn coin(mut self, coin: &str) -> Self {
        self.coin = Some(coin.to_string());
        self
    }

    pub fn user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    pub fn aggregate_by_time(mut self, aggregate: bool) -> Self {
        self.aggregate_by_time = Some(aggregate);
        self
    }

    /// Epoch milliseconds.
    pub fn start_time(mut self, start_time: i64) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn req(mut self, req: CandleRequest) -> Self {
        self.req = Some(req);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn omits_absent_fields() {
        let body = serde_json::to_value(InfoRequest::new("allMids")).unwrap();
        assert_eq!(body, json!({"type": "allMids"}));
    }

    #[test]
    fn uses_camel_case() {
        let request = InfoRequest::new("userFillsByTime")
            .user("0xabc")
            .start_time(1758460545000)
            .aggregate_by_time(true);
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "type": "userFillsByTime",
                "user": "0xabc",
                "aggregateByTime": true,
                "startTime": 1758460545000i64,
            })
        );
    }

    #[test]
    fn nests_candle_request() {
        let request = InfoRequest::new("candleSnapshot").req(CandleRequest {
            coin: "BTC".to_string(),
            interval: "1m".to_string(),
            start_time: 1,
            end_time: 2,
        });
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            json!({
                "type": "candleSnapshot",
                "req": {"coin": "BTC", "interval": "1m", "startTime": 1, "endTime": 2},
            })
        );
    }
}
