//! demos/dashboard.rs
//!
//! Geocodes an address, fetches its forecast and prints what the dashboard
//! widgets would show. Reads `ORS_API_KEY` from the environment or a `.env` file.
//!
//! To run this example:
//! cargo run --example dashboard -- "Moscow" [hourly.csv]

use std::error::Error;
use std::fs::File;

use meteodash::{ChartVariable, Dashboard, DonutVariable, LineChartOptions, ViewOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let address = args.next().unwrap_or_else(|| "Moscow".to_string());
    let csv_path = args.next();

    let dashboard = Dashboard::new()?;
    let data = match dashboard.load(&address).call().await {
        Ok(data) => data,
        Err(e) => {
            eprintln!("{}: {}", e.user_message(), e);
            return Ok(());
        }
    };

    println!("{} -> {}", data.address, data.coordinate);
    println!(
        "Local time: {} ({})",
        data.local_time,
        data.timezone.as_deref().unwrap_or("unknown timezone")
    );
    println!("Temperature: {}", data.metrics.temperature);
    println!("Wind speed:  {}", data.metrics.wind_speed);
    println!("Humidity:    {}", data.metrics.humidity);

    let options = ViewOptions {
        heatmap: ChartVariable::Temperature,
        donut: DonutVariable::WindSpeed80m,
        line_chart: LineChartOptions::new(
            vec![ChartVariable::Temperature, ChartVariable::WindSpeed],
            300,
        ),
    };
    let charts = data.charts(&options)?;
    println!("Heatmap:\n{}", charts.heatmap.head(Some(5)));
    println!("Donut:\n{}", charts.donut);
    println!("Line chart:\n{}", charts.line_chart.head(Some(5)));

    if let Some(path) = csv_path {
        let mut file = File::create(&path)?;
        data.table.write_csv(&mut file)?;
        println!("Wrote {} rows to {}", data.table.len(), path);
    }

    Ok(())
}
