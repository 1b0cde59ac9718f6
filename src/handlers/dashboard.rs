use axum::{
    extract::{Query, State},
    response::Html,
};
use chrono::{Datelike, NaiveDate};
use compute::{DailyInterval, ForecastHorizon};
use tracing::{debug, instrument};

use crate::schemas::{AppState, DashboardQuery};

const STYLE: &str = r#"
body {
    font-family: 'Roboto', sans-serif;
    background: linear-gradient(120deg, #89f7fe, #66a6ff);
    color: #2c3e50;
    margin: 0;
    padding: 0;
}
.main {
    background-color: white;
    padding: 30px;
    margin: 20px auto 0 auto;
    border-radius: 15px;
    box-shadow: 0 4px 15px rgba(0, 0, 0, 0.2);
    max-width: 800px;
}
.header {
    text-align: center;
    padding: 20px;
    color: white;
    background: linear-gradient(90deg, #2c3e50, #4ca1af);
    border-radius: 10px;
}
.header h1 { font-size: 3em; margin: 0; }
.header p { margin-top: 10px; font-size: 1.2em; color: #ecf0f1; }
label { font-weight: bold; color: #34495e; }
.prediction-card {
    display: flex;
    flex-direction: column;
    align-items: center;
    background: linear-gradient(to right, #f757da, #168aad);
    color: white;
    padding: 20px;
    border-radius: 15px;
    margin-top: 20px;
    box-shadow: 0 4px 15px rgba(0, 0, 0, 0.2);
}
.prediction-card h2 { font-size: 2em; color: white; }
.prediction-card p { font-size: 1.2em; font-weight: bold; margin: 5px 0; }
.speed {
    border: 2px solid white;
    background-color: rgba(255, 255, 255, 0.1);
    font-size: 1.5em;
    font-weight: bold;
    text-align: center;
    padding: 10px;
    border-radius: 10px;
    width: 150px;
}
.error {
    margin-top: 20px;
    padding: 15px;
    border-radius: 10px;
    background: #fdecea;
    color: #b3261e;
}
.footer { text-align: center; padding: 10px; margin-top: 30px; color: #f5f5f5; font-size: 0.9em; }
"#;

/// Everything the dashboard page needs to render.
#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub horizon: ForecastHorizon,
    pub selected: NaiveDate,
    pub prediction: Option<DailyInterval>,
    pub units: &'a str,
    pub model_name: &'a str,
}

/// Dashboard page with the date picker and the prediction for the selected date
#[instrument(skip(state))]
pub async fn dashboard(Query(query): Query<DashboardQuery>, State(state): State<AppState>) -> Html<String> {
    let horizon = state.table.horizon();
    let selected = query.date.unwrap_or(horizon.start());
    let prediction = state.table.lookup(selected);
    debug!(%selected, found = prediction.is_some(), "Rendering dashboard");

    Html(render_dashboard(&DashboardView {
        horizon,
        selected,
        prediction,
        units: &state.model_info.units,
        model_name: &state.model_info.name,
    }))
}

/// Message shown instead of a prediction for dates outside the horizon.
pub fn out_of_range_message(horizon: ForecastHorizon) -> String {
    format!(
        "Date out of range. Please select a date between {} and {}.",
        horizon.start().year(),
        horizon.end().year()
    )
}

pub fn render_dashboard(view: &DashboardView<'_>) -> String {
    let units = escape_html(view.units);

    let result = match &view.prediction {
        Some(interval) => format!(
            r#"<div class="prediction-card">
    <h2>🍃 Prediction for {date}</h2>
    <p>Lower Speed:</p>
    <div class="speed" id="lower-speed">{lower:.2} 💨{units}</div>
    <p style="margin-top: 20px;">Upper Speed:</p>
    <div class="speed" id="upper-speed">{upper:.2} 🌪️{units}</div>
</div>"#,
            date = interval.date,
            lower = interval.lower,
            upper = interval.upper,
            units = units,
        ),
        None => format!(
            r#"<div class="error" role="alert">{}</div>"#,
            out_of_range_message(view.horizon)
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Wind Prediction</title>
<style>{style}</style>
</head>
<body>
<div class="header">
    <h1>🌬️ Wind Prediction</h1>
    <p>Nearly accurate wind speed forecasts for planning and safety</p>
</div>
<div class="main">
    <form method="get" action="/">
        <label for="date">📅 Select a date for prediction</label>
        <input type="date" id="date" name="date" value="{selected}" min="{start}" max="{end}" onchange="this.form.submit()">
        <noscript><button type="submit">Show</button></noscript>
    </form>
    {result}
</div>
<div class="footer">Wind Forecast | {model_name}</div>
</body>
</html>
"#,
        style = STYLE,
        selected = view.selected,
        start = view.horizon.start(),
        end = view.horizon.end(),
        result = result,
        model_name = escape_html(view.model_name),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
