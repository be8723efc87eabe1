use anyhow::bail;
use clap::{Parser, Subcommand};

use skycast_core::{
    Config, ConditionCategory, DisplayModel, IpLocator, LocationQuery, QUICK_CITIES, Session,
    Units, WeatherClient,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and preferences.
    Configure,

    /// Show current weather for a city, coordinates, or your location.
    Show {
        /// City name; omit to use your approximate location.
        city: Option<String>,

        /// Latitude in decimal degrees.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude in decimal degrees.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Print the display model as JSON instead of formatted output.
        #[arg(long)]
        json: bool,
    },

    /// List the quick-access cities.
    Cities,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, lat, lon, json } => show(city, lat, lon, json).await,
            Command::Cities => {
                for city in QUICK_CITIES {
                    println!("{city}");
                }
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key =
        inquire::Password::new("OpenWeatherMap API key:").without_confirmation().prompt()?;
    let default_city = inquire::Text::new("Default city:")
        .with_default(config.default_city.as_deref().unwrap_or(skycast_core::DEFAULT_CITY))
        .prompt()?;
    let units = inquire::Select::new("Units:", vec!["metric", "imperial"]).prompt()?;

    config.api_key = Some(api_key);
    config.default_city = Some(default_city);
    config.units = Some(if units == "imperial" { Units::Imperial } else { Units::Metric });
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(
    city: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load()?;
    let client = WeatherClient::from_config(&config)?;

    let mut session = Session::new(client);
    if let Some(city) = &config.default_city {
        session = session.with_default_city(city.as_str());
    }

    let state = match (city, lat, lon) {
        (Some(city), _, _) => session.search(&city).await,
        (None, Some(lat), Some(lon)) => {
            session.fetch(&LocationQuery::Coordinates { lat, lon }).await
        }
        _ => {
            let locator = IpLocator::new()?;
            session.start(&locator).await
        }
    };

    if let Some(message) = &state.error {
        bail!("{message}");
    }
    let Some(model) = &state.model else {
        bail!("No weather data available");
    };

    if json {
        println!("{}", serde_json::to_string_pretty(model)?);
    } else {
        render(model);
    }

    Ok(())
}

fn render(model: &DisplayModel) {
    println!("{}", model.place);
    println!("{}  {}°  {}", glyph(model.category), model.temperature, model.description);
    println!(
        "feels like {}°, min {}° / max {}°",
        model.feels_like, model.temp_min, model.temp_max
    );
    println!();
    println!("wind        {}", model.wind);
    println!("humidity    {}", model.humidity);
    println!("visibility  {}", model.visibility);
    println!("pressure    {}", model.pressure);

    if let Some(observed_at) = model.observed_at {
        println!();
        println!("observed {}", observed_at.format("%Y-%m-%d %H:%M UTC"));
    }
}

fn glyph(category: ConditionCategory) -> &'static str {
    match category {
        ConditionCategory::Thunderstorm => "⛈",
        ConditionCategory::Drizzle => "🌦",
        ConditionCategory::Rain => "🌧",
        ConditionCategory::Snow => "❄",
        ConditionCategory::Atmosphere => "🌫",
        ConditionCategory::Clear => "☀",
        ConditionCategory::Clouds | ConditionCategory::Unknown => "☁",
    }
}
