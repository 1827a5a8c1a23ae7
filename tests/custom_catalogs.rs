use water_treatment_toolbox::{
    catalog::{PretreatmentKind, PretreatmentUnit, RoCategory, RoUnit, ValveConfig},
    config::{self, EngineeringParams},
    treatment::{size_with_catalogs, Advisory, Catalogs, SizingRequest},
};

const SMALL_RO: &[RoUnit] = &[
    RoUnit {
        category: RoCategory::Domestic,
        name: "BENCH 200",
        nominal_production_l_day: 200.0,
        max_ppm: 1500.0,
        recovery: 0.4,
        power_kw: 0.02,
    },
    RoUnit {
        category: RoCategory::Domestic,
        name: "BENCH 2000",
        nominal_production_l_day: 2000.0,
        max_ppm: 1500.0,
        recovery: 0.5,
        power_kw: 0.05,
    },
];

const ONE_SOFTENER: &[PretreatmentUnit] = &[PretreatmentUnit {
    kind: PretreatmentKind::Softener,
    name: "BENCH SOFT",
    vessel: "8x35",
    media_litres: 20.0,
    max_flow_m3h: 1.0,
    exchange_capacity: 100.0,
    salt_per_regen_kg: 3.0,
    valve: ValveConfig::Simplex,
    backwash_flow_m3h: 0.3,
}];

fn catalogs() -> Catalogs<'static> {
    Catalogs {
        ro: SMALL_RO,
        softeners: ONE_SOFTENER,
        ..Catalogs::standard()
    }
}

#[test]
fn domestic_only_catalog_uses_last_candidate_for_large_demand() {
    let request = SizingRequest {
        consumption_l_day: 650.0,
        temperature_c: 25.0,
        ..SizingRequest::default()
    };
    let result =
        size_with_catalogs(&request, &EngineeringParams::default(), &catalogs()).expect("valid");
    // 650 L/day: 산업용 후보가 없으므로 마지막 후보.
    assert_eq!(result.ro.as_ref().map(|r| r.unit.name), Some("BENCH 2000"));
}

#[test]
fn small_demand_takes_first_domestic() {
    let request = SizingRequest {
        consumption_l_day: 50.0,
        temperature_c: 25.0,
        ..SizingRequest::default()
    };
    let result =
        size_with_catalogs(&request, &EngineeringParams::default(), &catalogs()).expect("valid");
    assert_eq!(result.ro.as_ref().map(|r| r.unit.name), Some("BENCH 200"));
}

#[test]
fn empty_ro_catalog_has_no_solution() {
    let request = SizingRequest::default();
    let empty = Catalogs {
        ro: &[],
        ..Catalogs::standard()
    };
    let result = size_with_catalogs(&request, &EngineeringParams::default(), &empty).expect("valid");
    assert!(!result.is_solution());
    assert_eq!(
        result.advisories,
        vec![Advisory::NoStandardRo {
            feed_ppm: 800.0,
            required_l_day: 2000.0,
        }]
    );
}

#[test]
fn single_softener_within_rating_is_selected() {
    let request = SizingRequest {
        consumption_l_day: 500.0,
        temperature_c: 25.0,
        ..SizingRequest::default()
    };
    let result =
        size_with_catalogs(&request, &EngineeringParams::default(), &catalogs()).expect("valid");
    let softener = result
        .design
        .as_ref()
        .and_then(|d| d.softener.as_ref())
        .expect("softener");
    // 급수 1000 L/day × 35 °Hf = 35 °Hf·m3/day
    assert_eq!(softener.unit.name, "BENCH SOFT");
    assert!((softener.daily_load - 35.0).abs() < 1e-9);
    assert!((softener.autonomy_days - 100.0 / 35.0).abs() < 1e-9);
}

#[test]
fn config_file_overrides_engineering_constants() {
    let cfg = config::load_from_str(
        r#"
language = "en"

[engineering]
industrial_demand_threshold_l = 5000.0

[engineering.final_tank]
rule = "peak_deficit"
margin = 1.5
"#,
    )
    .expect("config");
    assert_eq!(cfg.language.as_deref(), Some("en"));

    let request = SizingRequest {
        consumption_l_day: 1500.0,
        temperature_c: 25.0,
        ..SizingRequest::default()
    };
    let result = size_with_catalogs(
        &request,
        &cfg.engineering,
        &Catalogs::standard(),
    )
    .expect("valid");
    // 임계값이 5000으로 올라가면 1500 L/day는 가정용 우선 구간이다.
    let ro = result.ro.as_ref().expect("RO");
    assert_eq!(ro.unit.category, RoCategory::Domestic);
    assert_eq!(ro.unit.name, "Direct Flow 1200");
    assert_eq!(result.design.as_ref().expect("design").buffer_tank_l, None);
}
