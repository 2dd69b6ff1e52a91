//! Named scenarios driving both backends with equivalent requests

use std::fmt;

use clap::ValueEnum;
use serde_json::Value;
use tracing::info;

use crate::client::InfoClient;
use crate::config::Config;
use crate::error::Result;
use crate::payload::{CandleRequest, InfoRequest};
use crate::{compare_shapes, report, TracingSink};

const CANDLE_INTERVAL: &str = "1m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    AllMids,
    L2Book,
    ClearinghouseState,
    OpenOrders,
    HistoricalOrders,
    UserFills,
    UserFillsByTime,
    Meta,
    MetaAndAssetCtxs,
    UserFunding,
    FundingHistory,
    Portfolio,
    CandleSnapshot,
}

/// Everything needed to run one scenario against both backends.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioPlan {
    pub scenario: Scenario,
    pub reference: InfoRequest,
    pub candidate: InfoRequest,
    pub detect_maps: bool,
    pub print_responses: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch,
}

impl Scenario {
    /// Value of the `type` discriminator sent to `/info`.
    pub fn request_type(self) -> &'static str {
        match self {
            Scenario::AllMids => "allMids",
            Scenario::L2Book => "l2Book",
            Scenario::ClearinghouseState => "clearinghouseState",
            Scenario::OpenOrders => "openOrders",
            Scenario::HistoricalOrders => "historicalOrders",
            Scenario::UserFills => "userFills",
            Scenario::UserFillsByTime => "userFillsByTime",
            Scenario::Meta => "meta",
            Scenario::MetaAndAssetCtxs => "metaAndAssetCtxs",
            Scenario::UserFunding => "userFunding",
            Scenario::FundingHistory => "fundingHistory",
            Scenario::Portfolio => "portfolio",
            Scenario::CandleSnapshot => "candleSnapshot",
        }
    }

    pub fn plan(self, config: &Config) -> ScenarioPlan {
        let base = InfoRequest::new(self.request_type());
        let same = |request: InfoRequest| (request.clone(), request);
        let per_user = |request: InfoRequest| {
            (
                request.clone().user(&config.reference_user),
                request.user(&config.candidate_user),
            )
        };

        let (reference, candidate) = match self {
            Scenario::AllMids | Scenario::Meta | Scenario::MetaAndAssetCtxs => same(base),
            Scenario::L2Book => same(base.coin(&config.coin)),
            Scenario::ClearinghouseState
            | Scenario::OpenOrders
            | Scenario::HistoricalOrders
            | Scenario::UserFunding
            | Scenario::Portfolio => per_user(base),
            Scenario::UserFills => {
                let (reference, candidate) = per_user(base);
                (reference.aggregate_by_time(false), candidate)
            }
            Scenario::UserFillsByTime => per_user(
                base.start_time(config.window_start_ms())
                    .aggregate_by_time(true),
            ),
            Scenario::FundingHistory => {
                same(base.coin(&config.coin).start_time(config.window_start_ms()))
            }
            Scenario::CandleSnapshot => same(base.req(CandleRequest {
                coin: config.coin.clone(),
                interval: CANDLE_INTERVAL.to_string(),
                start_time: config.window_start_ms(),
                end_time: config.window_end_ms,
            })),
        };

        ScenarioPlan {
            scenario: self,
            reference,
            candidate,
            // allMids is keyed by coin, so its key sets legitimately differ.
            detect_maps: self == Scenario::AllMids,
            print_responses: !matches!(self, Scenario::AllMids | Scenario::L2Book),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => f.write_str(self.request_type()),
        }
    }
}

impl From<bool> for Verdict {
    fn from(matches: bool) -> Self {
        if matches {
            Verdict::Match
        } else {
            Verdict::Mismatch
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Match => f.write_str("JSON shapes match"),
            Verdict::Mismatch => f.write_str("JSON shapes do not match"),
        }
    }
}

/// Runs scenarios against the reference and candidate backends
pub struct ScenarioRunner {
    config: Config,
    reference: InfoClient,
    candidate: InfoClient,
}

impl ScenarioRunner {
    pub fn new(config: Config) -> Result<Self> {
        let reference = InfoClient::new("Hyperliquid", &config.reference_url)?;
        let candidate = InfoClient::new("Ambient", &config.candidate_url)?;

        Ok(Self {
            config,
            reference,
            candidate,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Calls both backends one after the other, then compares the shapes of
    /// their answers. Only transport and parse failures are errors.
    pub async fn run(&self, scenario: Scenario) -> Result<Verdict> {
        let plan = scenario.plan(&self.config);
        info!(%scenario, request_type = scenario.request_type(), "running scenario");

        let reference = self.reference.info(&plan.reference).await?;
        let candidate = self.candidate.info(&plan.candidate).await?;

        if plan.print_responses {
            print_response(&self.reference, &reference)?;
            print_response(&self.candidate, &candidate)?;
        }

        let matches = compare_shapes(&reference, &candidate, plan.detect_maps, &mut TracingSink);
        let verdict = Verdict::from(matches);
        println!("{verdict}");

        Ok(verdict)
    }

    /// Runs every scenario in order, stopping at the first failed request.
    pub async fn run_all(&self, scenarios: &[Scenario]) -> Result<Vec<(Scenario, Verdict)>> {
        let mut results = Vec::with_capacity(scenarios.len());
        for &scenario in scenarios {
            let verdict = self.run(scenario).await?;
            results.push((scenario, verdict));
        }
        Ok(results)
    }

    pub fn print_summary(&self, results: &[(Scenario, Verdict)]) {
        println!("\n=== Shape Comparison Summary ===");
        println!("{}: {}", self.reference.name(), self.reference.base_url());
        println!("{}: {}", self.candidate.name(), self.candidate.base_url());
        println!("Window: {}", self.config.describe_window());
        println!();

        for (scenario, verdict) in results {
            let mark = match verdict {
                Verdict::Match => "✅",
                Verdict::Mismatch => "❌",
            };
            println!("{mark} {scenario} - {verdict}");
        }

        let matched = results
            .iter()
            .filter(|(_, verdict)| *verdict == Verdict::Match)
            .count();
        println!();
        println!("Results: {}/{} match", matched, results.len());
    }
}

fn print_response(client: &InfoClient, body: &Value) -> Result<()> {
    println!("{} response", client.name());
    report::print(body, true)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(request: &InfoRequest) -> Value {
        serde_json::to_value(request).unwrap()
    }

    #[test]
    fn only_all_mids_detects_maps() {
        let config = Config::default();
        for scenario in Scenario::value_variants() {
            let plan = scenario.plan(&config);
            assert_eq!(plan.detect_maps, *scenario == Scenario::AllMids, "{scenario}");
        }
    }

    #[test]
    fn user_scenarios_swap_only_the_user() {
        let config = Config::default();
        let plan = Scenario::ClearinghouseState.plan(&config);
        assert_eq!(
            body(&plan.reference),
            json!({"type": "clearinghouseState", "user": config.reference_user})
        );
        assert_eq!(
            body(&plan.candidate),
            json!({"type": "clearinghouseState", "user": config.candidate_user})
        );
        assert!(plan.print_responses);
    }

    #[test]
    fn user_fills_aggregates_only_on_reference() {
        let plan = Scenario::UserFills.plan(&Config::default());
        assert_eq!(plan.reference.aggregate_by_time, Some(false));
        assert_eq!(plan.candidate.aggregate_by_time, None);
    }

    #[test]
    fn user_fills_by_time_uses_window_start() {
        let config = Config::default();
        let plan = Scenario::UserFillsByTime.plan(&config);
        assert_eq!(
            body(&plan.candidate),
            json!({
                "type": "userFillsByTime",
                "user": config.candidate_user,
                "aggregateByTime": true,
                "startTime": 1758460545000i64,
            })
        );
    }

    #[test]
    fn shared_payload_scenarios() {
        let config = Config::default();
        let plan = Scenario::L2Book.plan(&config);
        assert_eq!(plan.reference, plan.candidate);
        assert_eq!(body(&plan.reference), json!({"type": "l2Book", "coin": "BTC"}));
        assert!(!plan.print_responses);

        let plan = Scenario::CandleSnapshot.plan(&config);
        assert_eq!(plan.reference, plan.candidate);
        assert_eq!(
            body(&plan.reference),
            json!({
                "type": "candleSnapshot",
                "req": {
                    "coin": "BTC",
                    "interval": "1m",
                    "startTime": 1758460545000i64,
                    "endTime": 1758546945000i64,
                },
            })
        );
    }

    #[test]
    fn scenario_names_are_kebab_case() {
        assert_eq!(Scenario::MetaAndAssetCtxs.to_string(), "meta-and-asset-ctxs");
        assert_eq!(Scenario::L2Book.to_string(), "l2-book");
        assert_eq!(Scenario::from_str("l2-book", false), Ok(Scenario::L2Book));
        assert_eq!(
            Scenario::from_str("user-fills-by-time", false),
            Ok(Scenario::UserFillsByTime)
        );
    }

    #[test]
    fn verdict_lines() {
        assert_eq!(Verdict::from(true).to_string(), "JSON shapes match");
        assert_eq!(Verdict::from(false).to_string(), "JSON shapes do not match");
    }
}
