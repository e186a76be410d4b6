//! Diagram generation service.
//!
//! Renders the wet and dry demonstration scenarios and writes the resulting
//! PNG files to the working directory. Takes no arguments; sprite assets are
//! read from the default style's `pics/` directory.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use diagram::{DiagramStyle, MeterDiagram};

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let style = DiagramStyle::default();

    info!(dtm = 200.0, flood_level = 205.4, "Rendering wet scenario");
    let mut wet = MeterDiagram::new(200.0, style.clone())?;
    wet.render_wet(205.4)?;
    wet.save("DiagramWetMeter.png")?;

    info!(dtm = 300.0, flood_level = 301.1, "Rendering dry scenario");
    let mut dry = MeterDiagram::new(300.0, style)?;
    dry.render_dry(301.1)?;
    dry.save("DiagramDryMeter.png")?;

    Ok(())
}
