use audio_biquad::{BiquadFilter, FilterError, FilterOptions, FilterType, StreamFormat, design};

#[test]
fn test_options_from_json() {
    let options: FilterOptions = serde_json::from_str(
        r#"{ "type": "highshelf", "frequency": 8000, "Q": 0.5, "gain": -3, "detune": 100 }"#,
    )
    .unwrap();

    assert_eq!(
        options,
        FilterOptions {
            filter_type: FilterType::HighShelf,
            frequency: 8000.0,
            detune: 100.0,
            q: 0.5,
            gain: -3.0,
        }
    );
}

#[test]
fn test_missing_fields_take_defaults() {
    let options: FilterOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(options, FilterOptions::default());

    let options: FilterOptions = serde_json::from_str(r#"{ "q": 4 }"#).unwrap();
    assert_eq!(options.q, 4.0);
    assert_eq!(options.filter_type, FilterType::LowPass);
}

#[test]
fn test_unknown_type_is_a_config_error() {
    let result = serde_json::from_str::<FilterOptions>(r#"{ "type": "comb" }"#);
    assert!(result.is_err());

    assert_eq!(
        "comb".parse::<FilterType>(),
        Err(FilterError::UnknownFilterType("comb".into()))
    );
}

#[test]
fn test_options_serialize_with_web_audio_keys() {
    let json = serde_json::to_value(FilterOptions::of_type(FilterType::AllPass)).unwrap();
    assert_eq!(json["type"], "allpass");
    assert_eq!(json["Q"], 1.0);
    assert_eq!(json["frequency"], 350.0);
}

#[test]
fn test_filter_from_parsed_type_name() {
    let format = StreamFormat::new(48000.0, 2).unwrap();
    let options = FilterOptions {
        filter_type: "notch".parse().unwrap(),
        frequency: 6000.0,
        q: 2.0,
        ..Default::default()
    };

    let filter = BiquadFilter::new(options, format).unwrap();
    assert_eq!(
        filter.coefficients(),
        design(FilterType::Notch, 0.25, 2.0, 0.0)
    );
}

#[test]
fn test_invalid_format_is_rejected() {
    assert!(matches!(
        StreamFormat::new(0.0, 1),
        Err(FilterError::InvalidFormat { .. })
    ));
}
