use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;
use suwon_eats::Result;
use suwon_eats::commands::{
    Origin, list_categories, list_restaurants, run_recommendation_repl, search_restaurants,
    show_nearby,
};
use suwon_eats::config::{Config, run_interactive_config, show_config};
use suwon_eats::geo::Coordinates;

const DEFAULT_NEARBY_LIMIT: usize = 10;

#[derive(Parser)]
#[command(name = "suwon-eats")]
#[command(about = "Restaurant recommendations and maps for Suwon's certified restaurants")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the data source, embedding backend and Ollama connection
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Recommend restaurants for a single query
    Search {
        /// Free-text query, e.g. "장안구 한식"
        query: String,
        /// Restaurant CSV snapshot to use instead of the configured one
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Interactive recommendation loop
    Repl {
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// List the restaurant categories in the snapshot
    Categories {
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// List restaurants with coordinates and the map framing
    List {
        /// Category to include; repeat for several. All when omitted
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Rank restaurants by distance from a location
    #[command(group(ArgGroup::new("origin").required(true).args(["lat", "address"])))]
    Nearby {
        /// Latitude of the starting point
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,
        /// Longitude of the starting point
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,
        /// Address to geocode as the starting point
        #[arg(long, conflicts_with_all = ["lat", "lon"])]
        address: Option<String>,
        /// Category to include; repeat for several. All when omitted
        #[arg(long = "category")]
        categories: Vec<String>,
        /// Number of restaurants to show
        #[arg(long, default_value_t = DEFAULT_NEARBY_LIMIT)]
        limit: usize,
        #[arg(long)]
        data: Option<PathBuf>,
    },
}

fn origin_from_args(lat: Option<f64>, lon: Option<f64>, address: Option<String>) -> Option<Origin> {
    match (lat.zip(lon), address) {
        (Some((latitude, longitude)), _) => {
            Some(Origin::Coordinates(Coordinates::new(latitude, longitude)))
        }
        (None, Some(address)) => Some(Origin::Address(address)),
        (None, None) => None,
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { show } => {
            if show {
                show_config()?;
            } else {
                run_interactive_config()?;
            }
        }
        Commands::Search { query, data } => {
            search_restaurants(&Config::load()?, &query, data)?;
        }
        Commands::Repl { data } => {
            run_recommendation_repl(&Config::load()?, data)?;
        }
        Commands::Categories { data } => {
            list_categories(&Config::load()?, data)?;
        }
        Commands::List { categories, data } => {
            list_restaurants(&Config::load()?, categories, data)?;
        }
        Commands::Nearby {
            lat,
            lon,
            address,
            categories,
            limit,
            data,
        } => {
            let origin = origin_from_args(lat, lon, address).ok_or_else(|| {
                suwon_eats::EatsError::Config(
                    "Either --lat/--lon or --address is required".to_string(),
                )
            })?;
            show_nearby(&Config::load()?, origin, categories, limit, data)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn search_command_with_query() {
        let cli = Cli::try_parse_from(["suwon-eats", "search", "장안구 한식"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Search { query, data } = parsed.command {
                assert_eq!(query, "장안구 한식");
                assert_eq!(data, None);
            } else {
                panic!("expected search command");
            }
        }
    }

    #[test]
    fn search_command_with_data_path() {
        let cli = Cli::try_parse_from([
            "suwon-eats",
            "search",
            "치킨",
            "--data",
            "datas/merged_data.csv",
        ]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Search { data, .. } = parsed.command {
                assert_eq!(data, Some(PathBuf::from("datas/merged_data.csv")));
            }
        }
    }

    #[test]
    fn repl_command() {
        let cli = Cli::try_parse_from(["suwon-eats", "repl"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            assert!(matches!(parsed.command, Commands::Repl { data: None }));
        }
    }

    #[test]
    fn list_command_collects_repeated_categories() {
        let cli = Cli::try_parse_from([
            "suwon-eats",
            "list",
            "--category",
            "한식",
            "--category",
            "중식",
        ]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::List { categories, .. } = parsed.command {
                assert_eq!(categories, vec!["한식", "중식"]);
            }
        }
    }

    #[test]
    fn nearby_with_coordinates() {
        let cli = Cli::try_parse_from([
            "suwon-eats",
            "nearby",
            "--lat",
            "37.2636",
            "--lon",
            "127.0286",
            "--limit",
            "3",
        ]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Nearby {
                lat,
                lon,
                address,
                limit,
                ..
            } = parsed.command
            {
                assert_eq!(
                    origin_from_args(lat, lon, address),
                    Some(Origin::Coordinates(Coordinates::new(37.2636, 127.0286)))
                );
                assert_eq!(limit, 3);
            }
        }
    }

    #[test]
    fn nearby_with_address_uses_default_limit() {
        let cli = Cli::try_parse_from(["suwon-eats", "nearby", "--address", "수원시청"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Nearby {
                lat,
                lon,
                address,
                limit,
                ..
            } = parsed.command
            {
                assert_eq!(
                    origin_from_args(lat, lon, address),
                    Some(Origin::Address("수원시청".to_string()))
                );
                assert_eq!(limit, DEFAULT_NEARBY_LIMIT);
            }
        }
    }

    #[test]
    fn nearby_requires_an_origin() {
        let cli = Cli::try_parse_from(["suwon-eats", "nearby"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn nearby_rejects_lat_without_lon() {
        let cli = Cli::try_parse_from(["suwon-eats", "nearby", "--lat", "37.2"]);
        assert!(cli.is_err());
    }

    #[test]
    fn nearby_rejects_address_with_coordinates() {
        let cli = Cli::try_parse_from([
            "suwon-eats",
            "nearby",
            "--address",
            "수원시청",
            "--lat",
            "37.2",
            "--lon",
            "127.0",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn config_show_flag() {
        let cli = Cli::try_parse_from(["suwon-eats", "config", "--show"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Config { show } = parsed.command {
                assert!(show);
            }
        }
    }

    #[test]
    fn invalid_command() {
        let cli = Cli::try_parse_from(["suwon-eats", "invalid"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn help_message() {
        let cli = Cli::try_parse_from(["suwon-eats", "--help"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
