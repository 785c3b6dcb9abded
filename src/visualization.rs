use serde_json::{Value, json};
use tracing::debug;

use crate::core::engine::report::MonthOutflow;

// Generates Chart.js configuration for the dashboard trend display
pub struct Visualization;

impl Visualization {
    /// Generates a Chart.js stacked bar chart configuration for the
    /// trailing spending trend.
    ///
    /// # Arguments
    /// * `trend` - Month buckets, oldest first, as produced by the report engine.
    ///
    /// # Returns
    /// A JSON Value containing the Chart.js configuration.
    pub fn spending_trend_chart(trend: &[MonthOutflow]) -> Value {
        debug!("Generating trend chart for {} month buckets", trend.len());

        let labels: Vec<String> = trend
            .iter()
            .map(|bucket| format!("{:04}-{:02}", bucket.year, bucket.month))
            .collect();
        let transaction_data: Vec<f64> = trend.iter().map(|b| b.transaction_total).collect();
        let emi_data: Vec<f64> = trend.iter().map(|b| b.emi_total).collect();
        let autopay_data: Vec<f64> = trend.iter().map(|b| b.autopay_total).collect();

        let base_colors = [
            (75, 192, 192),  // Teal
            (255, 99, 132),  // Red
            (54, 162, 235),  // Blue
        ];
        let dataset = |label: &str, data: &[f64], (r, g, b): (u8, u8, u8)| {
            json!({
                "label": label,
                "data": data,
                "backgroundColor": format!("rgba({}, {}, {}, 0.6)", r, g, b),
                "borderColor": format!("rgba({}, {}, {}, 1)", r, g, b),
                "borderWidth": 1
            })
        };

        json!({
            "type": "bar",
            "data": {
                "labels": labels,
                "datasets": [
                    dataset("Transactions", &transaction_data, base_colors[0]),
                    dataset("EMIs", &emi_data, base_colors[1]),
                    dataset("Autopays", &autopay_data, base_colors[2])
                ]
            },
            "options": {
                "scales": {
                    "y": {
                        "stacked": true,
                        "beginAtZero": true,
                        "title": {
                            "display": true,
                            "text": "Outflow (Currency)"
                        }
                    },
                    "x": {
                        "stacked": true,
                        "title": {
                            "display": true,
                            "text": "Month"
                        }
                    }
                },
                "plugins": {
                    "title": {
                        "display": true,
                        "text": "Spending, last 6 months"
                    }
                }
            }
        })
    }
}
