//! Deterministic one-line summaries for index entries.

use crate::AdviceType;
use serde_json::{Map, Value};

/// Fallback summary when the expected form fields are absent.
const GENERIC_SUMMARY: &str = "financial advice";

/// Derive the index summary for a record from its category and form inputs.
///
/// Pure and total: missing or oddly-typed fields degrade to a generic
/// summary rather than failing.
pub fn summarize(kind: AdviceType, form_data: &Map<String, Value>) -> String {
    let field = |name: &str| form_data.get(name).map(render_value);
    match kind {
        AdviceType::Budget => field("monthlyIncome")
            .map(|income| format!("monthly income {income} budget plan")),
        AdviceType::Saving => field("savingGoal").zip(field("targetAmount")).map(
            |(goal, amount)| format!("{goal} savings goal of {amount}"),
        ),
        AdviceType::Purchase => field("productName")
            .zip(field("productPrice"))
            .map(|(name, price)| format!("{name} at {price}")),
        AdviceType::Diagnosis => field("diagnosisIncome")
            .map(|income| format!("financial diagnosis for monthly income {income}")),
    }
    .unwrap_or_else(|| GENERIC_SUMMARY.to_string())
}

/// Render a form value without JSON decoration: strings unquoted, integral
/// floats without a trailing `.0`.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if float.fract() == 0.0 && number.as_i64().is_none() => {
                format!("{}", float as i64)
            }
            _ => number.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use crate::AdviceType;
    use pretty_assertions::assert_eq;
    use serde_json::{Map, json};

    fn form(pairs: &[(&str, serde_json::Value)]) -> Map<String, serde_json::Value> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn budget_summary_includes_income() {
        let data = form(&[("monthlyIncome", json!(8000))]);
        assert_eq!(
            summarize(AdviceType::Budget, &data),
            "monthly income 8000 budget plan"
        );
    }

    #[test]
    fn saving_summary_combines_goal_and_amount() {
        let data = form(&[("savingGoal", json!("house deposit")), ("targetAmount", json!(50000))]);
        assert_eq!(
            summarize(AdviceType::Saving, &data),
            "house deposit savings goal of 50000"
        );
    }

    #[test]
    fn purchase_summary_combines_name_and_price() {
        let data = form(&[("productName", json!("laptop")), ("productPrice", json!(1299.5))]);
        assert_eq!(summarize(AdviceType::Purchase, &data), "laptop at 1299.5");
    }

    #[test]
    fn diagnosis_summary_includes_income() {
        let data = form(&[("diagnosisIncome", json!(12000))]);
        assert_eq!(
            summarize(AdviceType::Diagnosis, &data),
            "financial diagnosis for monthly income 12000"
        );
    }

    #[test]
    fn missing_fields_fall_back_to_generic_summary() {
        let data = form(&[]);
        assert_eq!(summarize(AdviceType::Budget, &data), "financial advice");
        assert_eq!(summarize(AdviceType::Saving, &data), "financial advice");
    }

    #[test]
    fn integral_floats_render_without_fraction() {
        let data = form(&[("monthlyIncome", json!(8000.0))]);
        assert_eq!(
            summarize(AdviceType::Budget, &data),
            "monthly income 8000 budget plan"
        );
    }
}
