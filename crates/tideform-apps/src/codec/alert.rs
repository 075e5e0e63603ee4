//! App and component alerts

use super::value::{self, Block};
use crate::wire::{AlertOperator, AlertRule, AlertSpec, AlertWindow};
use serde_json::{Value, json};

/// App-level alerts: `rule` and `disabled` only
pub(crate) fn expand_app<'a>(items: impl Iterator<Item = &'a Block>) -> Vec<AlertSpec> {
    items
        .map(|alert| AlertSpec {
            rule: parse_rule(alert),
            disabled: value::boolean(alert, "disabled"),
            operator: None,
            value: 0.0,
            window: None,
        })
        .collect()
}

pub(crate) fn expand_component<'a>(items: impl Iterator<Item = &'a Block>) -> Vec<AlertSpec> {
    items
        .map(|alert| AlertSpec {
            rule: parse_rule(alert),
            disabled: value::boolean(alert, "disabled"),
            operator: AlertOperator::lenient(&value::string(alert, "operator")),
            value: value::float(alert, "value"),
            window: AlertWindow::lenient(&value::string(alert, "window")),
        })
        .collect()
}

pub(crate) fn flatten_app(alerts: &[AlertSpec]) -> Value {
    Value::Array(
        alerts
            .iter()
            .map(|alert| {
                json!({
                    "rule": alert.rule.as_str(),
                    "disabled": alert.disabled,
                })
            })
            .collect(),
    )
}

pub(crate) fn flatten_component(alerts: &[AlertSpec]) -> Value {
    Value::Array(
        alerts
            .iter()
            .map(|alert| {
                json!({
                    "rule": alert.rule.as_str(),
                    "disabled": alert.disabled,
                    "operator": alert.operator.as_ref().map(|o| o.as_str()).unwrap_or_default(),
                    "value": alert.value,
                    "window": alert.window.as_ref().map(|w| w.as_str()).unwrap_or_default(),
                })
            })
            .collect(),
    )
}

fn parse_rule(alert: &Block) -> AlertRule {
    AlertRule::lenient(&value::string(alert, "rule")).unwrap_or(AlertRule::Unspecified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(value: Value) -> Block {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_component_alert_round_trip() {
        let input = [block(json!({
            "rule": "CPU_UTILIZATION",
            "operator": "GREATER_THAN",
            "window": "FIVE_MINUTES",
            "value": 75.5,
            "disabled": false,
        }))];
        let alerts = expand_component(input.iter());

        assert_eq!(alerts[0].rule, AlertRule::CpuUtilization);
        assert_eq!(alerts[0].operator, Some(AlertOperator::GreaterThan));
        assert_eq!(alerts[0].window, Some(AlertWindow::FiveMinutes));
        assert_eq!(alerts[0].value, 75.5);

        assert_eq!(flatten_component(&alerts), json!([input[0]]));
    }

    #[test]
    fn test_app_alert_ignores_thresholds() {
        let input = [block(json!({"rule": "DEPLOYMENT_FAILED", "disabled": true, "value": 3}))];
        let alerts = expand_app(input.iter());

        assert_eq!(alerts[0].rule, AlertRule::DeploymentFailed);
        assert!(alerts[0].disabled);
        assert_eq!(alerts[0].value, 0.0);
        assert_eq!(
            flatten_app(&alerts),
            json!([{"rule": "DEPLOYMENT_FAILED", "disabled": true}])
        );
    }
}
