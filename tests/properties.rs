//! 사이징 엔진의 불변 조건을 무작위 입력으로 검사한다.

use proptest::prelude::*;
use water_treatment_toolbox::{
    catalog::{ro_catalog, RoCategory},
    config::EngineeringParams,
    treatment::{
        blend_plan, derated_capacity, select_ro, size_installation,
        softener::SoftenerTier,
        temperature::temperature_correction_factor, SizingRequest, TreatmentTarget,
    },
};

fn request_strategy() -> impl Strategy<Value = SizingRequest> {
    (
        100.0f64..40_000.0,
        50.0f64..7_000.0,
        0.0f64..80.0,
        1.0f64..30.0,
        1.0f64..24.0,
        any::<bool>(),
    )
        .prop_map(
            |(consumption, feed_ppm, hardness, temperature, peak_hours, buffer_tank)| {
                SizingRequest {
                    consumption_l_day: consumption,
                    feed_ppm,
                    hardness_hf: hardness,
                    temperature_c: temperature,
                    peak_hours,
                    buffer_tank,
                    ..SizingRequest::default()
                }
            },
        )
}

proptest! {
    #[test]
    fn maximum_purity_sends_all_water_through_ro(
        consumption in 1.0f64..50_000.0,
        feed_ppm in 0.0f64..10_000.0,
    ) {
        let plan = blend_plan(consumption, feed_ppm, TreatmentTarget::MaximumPurity, 0.05);
        prop_assert_eq!(plan.ro_fraction, 1.0);
        prop_assert_eq!(plan.bypass_volume_l, 0.0);
        prop_assert_eq!(plan.ro_volume_l, consumption);
    }

    #[test]
    fn blend_fraction_stays_in_unit_interval(
        consumption in 1.0f64..50_000.0,
        feed_ppm in 0.0f64..10_000.0,
        target in 0.0f64..12_000.0,
    ) {
        let plan = blend_plan(consumption, feed_ppm, TreatmentTarget::TargetSalinity(target), 0.05);
        prop_assert!((0.0..=1.0).contains(&plan.ro_fraction));
        prop_assert!(plan.target_ppm >= plan.permeate_ppm);
        prop_assert!((plan.ro_volume_l + plan.bypass_volume_l - consumption).abs() < 1e-6);
    }

    #[test]
    fn tcf_is_bounded(temp in -40.0f64..80.0) {
        let tcf = temperature_correction_factor(temp, &EngineeringParams::default());
        prop_assert!((0.1..=1.0).contains(&tcf));
    }

    #[test]
    fn selected_ro_respects_salinity_and_capacity(
        feed_ppm in 0.0f64..7_000.0,
        required in 0.0f64..35_000.0,
        tcf in 0.1f64..=1.0,
    ) {
        let params = EngineeringParams::default();
        if let Some(sel) = select_ro(ro_catalog(), feed_ppm, required, tcf, &params) {
            prop_assert!(sel.unit.max_ppm >= feed_ppm);
            prop_assert!(sel.derated_capacity_l_day >= required);
            prop_assert_eq!(sel.derated_capacity_l_day, derated_capacity(&sel.unit, tcf, &params));
        }
    }

    #[test]
    fn large_demand_prefers_industrial_when_one_fits(
        feed_ppm in 0.0f64..7_000.0,
        required in 601.0f64..35_000.0,
        tcf in 0.1f64..=1.0,
    ) {
        let params = EngineeringParams::default();
        let industrial_fits = ro_catalog().iter().any(|u| {
            u.category == RoCategory::Industrial
                && u.max_ppm >= feed_ppm
                && derated_capacity(u, tcf, &params) >= required
        });
        let sel = select_ro(ro_catalog(), feed_ppm, required, tcf, &params);
        if industrial_fits {
            let sel = sel.expect("industrial unit fits");
            prop_assert_eq!(sel.unit.category, RoCategory::Industrial);
        }
    }

    #[test]
    fn sizing_invariants_hold(request in request_strategy()) {
        let params = EngineeringParams::default();
        let result = size_installation(&request, &params).expect("valid request");
        prop_assert_eq!(result.ro.is_some(), result.design.is_some());
        if let (Some(ro), Some(design)) = (&result.ro, &result.design) {
            prop_assert!(ro.unit.max_ppm >= request.feed_ppm);
            prop_assert!(ro.derated_capacity_l_day >= result.blend.ro_volume_l);

            let flows = &design.flows;
            prop_assert!((flows.feed_l - flows.reject_l - flows.product_l).abs() < 1e-6);

            if let Some(softener) = &design.softener {
                let load = flows.feed_l / 1000.0 * request.hardness_hf;
                prop_assert!((softener.daily_load - load).abs() < 1e-9);
                prop_assert!(
                    (softener.autonomy_days - softener.unit.exchange_capacity / load).abs() < 1e-9
                );
                prop_assert!(softener.unit.max_flow_lh() >= design.design_flow.design_flow_lh);
                if softener.tier == SoftenerTier::Preferred && !softener.unit.is_duplex() {
                    prop_assert!(softener.autonomy_days >= params.softener.domestic_min_days);
                }
            }
            for filter in [&design.carbon, &design.sand].into_iter().flatten() {
                prop_assert!(filter.unit.max_flow_lh() >= design.design_flow.design_flow_lh);
                prop_assert!(filter.load_ratio <= 1.0);
            }
            prop_assert!(design.pipe.governing_flow_lh >= design.design_flow.design_flow_lh);
            prop_assert_eq!(design.buffer_tank_l.is_some(), request.buffer_tank);
        }
    }
}
