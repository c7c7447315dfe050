use super::*;

#[test]
fn parses_recommend_with_category_and_position() {
    let cli = Cli::try_parse_from([
        "nearby-cli",
        "recommend",
        "--category",
        "cafe",
        "--lat",
        "37.5",
        "--lng",
        "127.0",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Recommend { category, position }) => {
            assert_eq!(category, Some(Category::Cafe));
            assert_eq!(position.lat, Some(37.5));
            assert_eq!(position.lng, Some(127.0));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn recommend_without_flags_uses_defaults() {
    let cli = Cli::try_parse_from(["nearby-cli", "recommend"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Recommend {
            category: None,
            position: PositionArgs {
                lat: None,
                lng: None
            }
        })
    ));
}

#[test]
fn recommend_rejects_unknown_category() {
    assert!(Cli::try_parse_from(["nearby-cli", "recommend", "--category", "bar"]).is_err());
}

#[test]
fn lat_requires_lng() {
    assert!(Cli::try_parse_from(["nearby-cli", "recommend", "--lat", "37.5"]).is_err());
}

#[test]
fn negative_coordinates_are_accepted() {
    let cli = Cli::try_parse_from(["nearby-cli", "session", "--lat", "-33.86", "--lng", "151.2"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Session {
            position: PositionArgs {
                lat: Some(_),
                lng: Some(_)
            }
        })
    ));
}

#[test]
fn parses_distance_with_negative_numbers() {
    let cli = Cli::try_parse_from(["nearby-cli", "distance", "0", "0", "-1.5", "-179"])
        .expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Distance { .. })));
}

#[test]
fn parses_categories_command() {
    let cli = Cli::try_parse_from(["nearby-cli", "categories"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Categories)));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["nearby-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn fixed_position_yields_supported_provider() {
    let config = test_config(Some("http://127.0.0.1:9/locate"));
    let provider = location_provider(
        &config,
        PositionArgs {
            lat: Some(37.5),
            lng: Some(127.0),
        },
    )
    .expect("valid position");
    assert!(provider.is_supported());
}

#[test]
fn no_position_and_no_endpoint_is_unsupported() {
    let config = test_config(None);
    let provider = location_provider(
        &config,
        PositionArgs {
            lat: None,
            lng: None,
        },
    )
    .expect("provider selection should not fail");
    assert!(!provider.is_supported());
}

#[test]
fn out_of_range_position_is_rejected() {
    let config = test_config(None);
    let result = location_provider(
        &config,
        PositionArgs {
            lat: Some(123.0),
            lng: Some(0.0),
        },
    );
    assert!(result.is_err());
}

#[test]
fn distance_runs_without_configuration() {
    assert!(run_distance(37.5, 127.0, 37.337, 127.268).is_ok());
}

#[test]
fn distance_rejects_out_of_range_coordinates() {
    assert!(run_distance(91.0, 0.0, 0.0, 0.0).is_err());
}

fn test_config(geolocation_url: Option<&str>) -> AppConfig {
    AppConfig {
        log_level: "info".to_string(),
        places_base_url: "http://127.0.0.1:8000".to_string(),
        request_timeout_secs: 5,
        location_timeout_secs: 5,
        user_agent: "nearby-test/0.1".to_string(),
        default_category: Category::Restaurant,
        map_zoom: 15,
        maps_api_key: None,
        geolocation_url: geolocation_url.map(str::to_string),
    }
}
