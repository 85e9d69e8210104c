//! demos/graph_data.rs
//!
//! Fetches the forecast for an address and plots temperature and 10 m wind
//! speed over the forecast window with `plotlars`.
//!
//! To run this example:
//! cargo run --example graph_data --features examples -- "Utrecht"

use std::error::Error;

use meteodash::{ChartVariable, Dashboard, LineChartOptions, line_chart_frame};
use plotlars::{Axis, Legend, Line, Plot, Rgb, Text, TimeSeriesPlot};
use polars::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let address = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Utrecht".to_string());

    println!("Fetching forecast for {}...", address);
    let dashboard = Dashboard::new()?;
    let data = dashboard.load(&address).call().await?;

    let options = LineChartOptions::new(
        vec![ChartVariable::Temperature, ChartVariable::WindSpeed],
        400,
    );
    let frame = line_chart_frame(&data.table, &options)?;

    println!("Generating plot...");
    plot_forecast(&frame, &address);
    println!("Plot shown in browser.");

    Ok(())
}

fn plot_forecast(data: &DataFrame, address: &str) {
    TimeSeriesPlot::builder()
        .data(data)
        .x("time")
        .y("temperature")
        .additional_series(vec!["wind_speed"])
        .size(8)
        .colors(vec![Rgb(235, 117, 0), Rgb(69, 157, 230)])
        .lines(vec![Line::Solid, Line::Dash])
        .plot_title(Text::from(format!("Forecast for {}", address)).size(18))
        .legend(&Legend::new().x(0.05).y(0.9))
        .x_title("time")
        .y_title(Text::from("°C / m/s").color(Rgb(0, 0, 0)))
        .y_axis(
            &Axis::new()
                .value_color(Rgb(0, 0, 0))
                .show_grid(false)
                .zero_line_color(Rgb(0, 0, 0)),
        )
        .build()
        .plot();
}
