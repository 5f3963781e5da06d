use epi_chart::simulation::{ModelType, detect_model_type};

#[test]
fn seirv_header_is_detected() {
    let text = "Results:\nMonth S E I R V\n0 100 0 1 0 0\n";
    assert_eq!(detect_model_type(text), ModelType::Seirv);
}

#[test]
fn every_header_variant_resolves() {
    assert_eq!(detect_model_type("Month S E I R\n"), ModelType::Seir);
    assert_eq!(detect_model_type("Month S I R V\n"), ModelType::Sirv);
    assert_eq!(detect_model_type("Month S I R\n"), ModelType::Sir);
}

#[test]
fn header_wins_over_keywords() {
    let text = "Nobody is exposed or vaccinated here.\nMonth S I R\n0 10 1 0\n";
    assert_eq!(detect_model_type(text), ModelType::Sir);
}

#[test]
fn keywords_decide_without_a_header() {
    assert_eq!(
        detect_model_type("The Vaccinated group grows quickly."),
        ModelType::Sirv
    );
    assert_eq!(
        detect_model_type("People who are EXPOSED become infectious later."),
        ModelType::Seir
    );
    assert_eq!(
        detect_model_type("Both exposed and vaccinated counts are tracked."),
        ModelType::Seirv
    );
}

#[test]
fn plain_text_defaults_to_sir() {
    assert_eq!(detect_model_type(""), ModelType::Sir);
    assert_eq!(detect_model_type("No table this time."), ModelType::Sir);
}

#[test]
fn day_headers_fall_back_to_keywords() {
    assert_eq!(detect_model_type("Day S E I R\n0 10 0 1 0\n"), ModelType::Sir);
    assert_eq!(
        detect_model_type("Exposed people incubate.\nDay S E I R\n0 10 0 1 0\n"),
        ModelType::Seir
    );
}

#[test]
fn model_titles_follow_codes() {
    assert_eq!(ModelType::Seirv.chart_title(), "SEIRV Simulation");
    assert_eq!(ModelType::Sir.to_string(), "SIR");
}
