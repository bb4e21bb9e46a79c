use std::path::Path;

const PROFILE_PATH: &str = "profiles/default_lathe.json";

fn main() {
    let profile_path = Path::new(PROFILE_PATH);
    validate_profile_file(profile_path);
    set_build_dependencies();
}

fn validate_profile_file(profile_path: &Path) {
    // Ensure the embedded profile exists at build time
    assert!(
        profile_path.exists(),
        "\n\nPROFILE BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the lathe profile before building.\n",
        profile_path.display()
    );

    let contents = std::fs::read_to_string(profile_path).unwrap_or_else(|e| {
        panic!(
            "\n\nPROFILE BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            profile_path.display()
        );
    });

    let profile: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nPROFILE BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            profile_path.display()
        );
    });

    validate_profile_structure(&profile);
}

fn validate_profile_structure(profile: &serde_json::Value) {
    assert!(
        profile.is_object(),
        "\n\nPROFILE BUILD ERROR: Root must be a JSON object\n\
         Got: {profile}\n"
    );

    for field in ["version", "name"] {
        assert!(
            profile.get(field).and_then(serde_json::Value::as_str).is_some(),
            "\n\nPROFILE BUILD ERROR: Missing string field '{field}'\n"
        );
    }

    let gears = validate_gears(profile);
    validate_leadscrew(profile);
    let metric = validate_pitches(profile, "metric_pitches");
    let imperial = validate_pitches(profile, "imperial_pitches");

    println!(
        "cargo:warning=Validated lathe profile: {gears} gears, {metric} metric and {imperial} imperial pitches"
    );
}

fn validate_gears(profile: &serde_json::Value) -> usize {
    let gears = profile
        .get("gears")
        .and_then(serde_json::Value::as_array)
        .unwrap_or_else(|| {
            panic!(
                "\n\nPROFILE BUILD ERROR: Missing 'gears' field\n\
                 The profile must have a top-level 'gears' array of tooth counts.\n"
            );
        });

    assert!(
        !gears.is_empty(),
        "\n\nPROFILE BUILD ERROR: 'gears' must not be empty\n"
    );

    for (i, gear) in gears.iter().enumerate() {
        let teeth = gear.as_u64().unwrap_or(0);
        assert!(
            teeth > 0,
            "\n\nPROFILE BUILD ERROR: Gear at index {i} must be a positive tooth count\n\
             Got: {gear}\n"
        );
    }

    gears.len()
}

fn validate_leadscrew(profile: &serde_json::Value) {
    let leadscrew = profile.get("leadscrew").unwrap_or_else(|| {
        panic!(
            "\n\nPROFILE BUILD ERROR: Missing 'leadscrew' field\n\
             Expected {{\"tpi\": 8}} or {{\"mm\": 3}}.\n"
        );
    });

    let value = leadscrew
        .get("tpi")
        .or_else(|| leadscrew.get("mm"))
        .and_then(serde_json::Value::as_f64)
        .unwrap_or(0.0);
    assert!(
        value > 0.0,
        "\n\nPROFILE BUILD ERROR: Leadscrew must give a positive 'tpi' or 'mm'\n\
         Got: {leadscrew}\n"
    );
}

fn validate_pitches(profile: &serde_json::Value, field: &str) -> usize {
    let Some(pitches) = profile.get(field) else {
        return 0;
    };

    let pitches = pitches.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nPROFILE BUILD ERROR: '{field}' must be an array\n\
             Got: {pitches}\n"
        );
    });

    for (i, pitch) in pitches.iter().enumerate() {
        let value = pitch.as_f64().unwrap_or(0.0);
        assert!(
            value > 0.0,
            "\n\nPROFILE BUILD ERROR: '{field}' entry {i} must be a positive number\n\
             Got: {pitch}\n"
        );
    }

    pitches.len()
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the profile changes
    println!("cargo:rerun-if-changed={PROFILE_PATH}");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
