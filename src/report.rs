//! 사이징 결과를 텍스트 보고서로 만든다. 대시보드와 출력용 보고서가 같은 내용을 쓴다.

use std::fmt::Write;

use crate::catalog::{self, PretreatmentKind, PretreatmentUnit, RoCategory, ValveConfig};
use crate::i18n::{keys, Translator};
use crate::treatment::engine::{InstallationDesign, SizingRequest, SizingResult};
use crate::treatment::pretreatment::{FilterSelection, OperatingMode, SourceType};
use crate::treatment::TreatmentTarget;

fn category_label(tr: &Translator, category: RoCategory) -> &str {
    match category {
        RoCategory::Domestic => tr.t(keys::LABEL_DOMESTIC),
        RoCategory::Industrial => tr.t(keys::LABEL_INDUSTRIAL),
    }
}

fn valve_label(valve: ValveConfig) -> &'static str {
    match valve {
        ValveConfig::Simplex => "Simplex",
        ValveConfig::Duplex => "Duplex",
    }
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n-- {title} --");
}

fn line(out: &mut String, label: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {label:<24} {value}");
}

/// 전체 보고서를 만든다.
pub fn render_report(request: &SizingRequest, result: &SizingResult, tr: &Translator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", tr.t(keys::REPORT_TITLE));
    render_parameters(&mut out, request, result, tr);

    match (&result.ro, &result.design) {
        (Some(ro), Some(design)) => {
            heading(&mut out, tr.t(keys::REPORT_SECTION_EQUIPMENT));
            line(
                &mut out,
                tr.t(keys::LABEL_RO),
                format!(
                    "{} ({}, {} {:.0} L/day, {:.0}%)",
                    ro.unit.name,
                    category_label(tr, ro.unit.category),
                    tr.t(keys::LABEL_DERATED),
                    ro.derated_capacity_l_day,
                    design.flows.effective_recovery * 100.0
                ),
            );
            render_equipment(&mut out, design, tr);
            render_flows(&mut out, design, tr);
            render_costs(&mut out, design, tr);
            render_installation(&mut out, design, tr);
        }
        _ => {
            let _ = writeln!(out, "\n!! {}", tr.t(keys::REPORT_NO_SOLUTION));
        }
    }

    if !result.advisories.is_empty() {
        heading(&mut out, tr.t(keys::REPORT_SECTION_ADVISORIES));
        for advisory in &result.advisories {
            let _ = writeln!(out, "  - {}", advisory.message(tr));
        }
    }
    out
}

fn render_parameters(out: &mut String, request: &SizingRequest, result: &SizingResult, tr: &Translator) {
    heading(out, tr.t(keys::REPORT_SECTION_PARAMETERS));
    line(
        out,
        tr.t(keys::LABEL_CONSUMPTION),
        format!("{:.0} L/day", request.consumption_l_day),
    );
    line(out, tr.t(keys::LABEL_FEED_PPM), format!("{:.0} ppm", request.feed_ppm));
    let target = match request.target {
        TreatmentTarget::MaximumPurity => tr.t(keys::LABEL_TARGET_MAX).to_string(),
        TreatmentTarget::TargetSalinity(_) => format!(
            "{:.0} ppm ({} {:.1}%, {} {:.0} L/day)",
            result.blend.target_ppm,
            tr.t(keys::LABEL_BLEND),
            result.blend.ro_fraction * 100.0,
            tr.t(keys::LABEL_BYPASS),
            result.blend.bypass_volume_l
        ),
    };
    line(out, tr.t(keys::LABEL_TARGET), target);
    line(out, tr.t(keys::LABEL_HARDNESS), format!("{:.1} °fH", request.hardness_hf));
    line(
        out,
        tr.t(keys::LABEL_TEMPERATURE),
        format!("{:.1} °C (TCF {:.2})", request.temperature_c, result.tcf),
    );
    let source = match request.source {
        SourceType::Mains => tr.t(keys::LABEL_SOURCE_MAINS),
        SourceType::Well => tr.t(keys::LABEL_SOURCE_WELL),
    };
    line(out, tr.t(keys::LABEL_SOURCE), source);
    line(
        out,
        tr.t(keys::LABEL_HOURS),
        format!("{:.1} h / {:.1} h", request.operating_hours, request.peak_hours),
    );
}

fn filter_line(out: &mut String, tr: &Translator, label_key: &str, sel: Option<&FilterSelection>) {
    let value = match sel {
        Some(f) => format!(
            "{} ({:.1} m3/h, {} {:.0}%)",
            f.unit.name,
            f.unit.max_flow_m3h,
            tr.t(keys::LABEL_LOAD_RATIO),
            f.load_ratio * 100.0
        ),
        None => tr.t(keys::REPORT_NONE).to_string(),
    };
    line(out, tr.t(label_key), value);
}

fn render_equipment(out: &mut String, design: &InstallationDesign, tr: &Translator) {
    let softener = match &design.softener {
        Some(s) => format!(
            "{} ({}, {:.0} L, {}) {} {:.1} d",
            s.unit.name,
            s.unit.vessel,
            s.unit.media_litres,
            valve_label(s.unit.valve),
            tr.t(keys::LABEL_REGENERATION),
            s.autonomy_days
        ),
        None => tr.t(keys::REPORT_NOT_REQUIRED).to_string(),
    };
    line(out, tr.t(keys::LABEL_SOFTENER), softener);
    filter_line(out, tr, keys::LABEL_CARBON, design.carbon.as_ref());
    filter_line(out, tr, keys::LABEL_SAND, design.sand.as_ref());
}

fn render_flows(out: &mut String, design: &InstallationDesign, tr: &Translator) {
    let f = &design.flows;
    heading(out, tr.t(keys::REPORT_SECTION_FLOWS));
    line(out, tr.t(keys::LABEL_FEED), format!("{:.0} L/day", f.feed_l));
    line(out, tr.t(keys::LABEL_REJECT), format!("{:.0} L/day", f.reject_l));
    line(out, tr.t(keys::LABEL_BYPASS), format!("{:.0} L/day", f.bypass_l));
    line(
        out,
        tr.t(keys::LABEL_PRODUCTION),
        format!("{:.0} L/day ({:.0} L/h)", f.real_production_l_day, f.production_lh),
    );
    line(
        out,
        tr.t(keys::LABEL_PEAK_INTAKE),
        format!("{:.0} L/h", design.peak_intake_lh),
    );
    let mode = match design.design_flow.mode {
        OperatingMode::Direct => tr.t(keys::LABEL_MODE_DIRECT),
        OperatingMode::Buffered => tr.t(keys::LABEL_MODE_BUFFERED),
    };
    line(out, tr.t(keys::LABEL_MODE), mode);
    line(
        out,
        tr.t(keys::LABEL_DESIGN_FLOW),
        format!("{:.0} L/h", design.design_flow.design_flow_lh),
    );
}

fn render_costs(out: &mut String, design: &InstallationDesign, tr: &Translator) {
    let c = &design.economics;
    heading(out, tr.t(keys::REPORT_SECTION_COSTS));
    line(out, tr.t(keys::LABEL_WATER_COST), format!("{:.0} €/year", c.water_annual));
    line(
        out,
        tr.t(keys::LABEL_SALT_COST),
        format!("{:.0} €/year ({:.0} kg)", c.salt_annual, c.salt_kg_year),
    );
    line(
        out,
        tr.t(keys::LABEL_ELECTRICITY_COST),
        format!("{:.0} €/year ({:.1} h/day)", c.electricity_annual, c.ro_run_hours_day),
    );
    line(
        out,
        tr.t(keys::LABEL_TOTAL_COST),
        format!("{:.0} €/year, {:.2} €/day", c.total_annual, c.total_daily),
    );
}

fn render_installation(out: &mut String, design: &InstallationDesign, tr: &Translator) {
    let inst = &design.installation;
    heading(out, tr.t(keys::REPORT_SECTION_INSTALLATION));
    line(
        out,
        tr.t(keys::LABEL_MIN_FEED),
        format!(
            "{:.0} L/h ({:.2} m3/h) @ {:.1} bar",
            inst.min_feed_flow_lh, inst.min_feed_flow_m3h, inst.feed_pressure_bar
        ),
    );
    line(
        out,
        tr.t(keys::LABEL_PIPE),
        format!("{} ({:.2} m/s)", inst.pipe_label, design.pipe.velocity_m_s),
    );
    let buffer = match inst.buffer_tank_l {
        Some(v) => format!("{v:.0} L"),
        None => tr.t(keys::REPORT_NOT_REQUIRED).to_string(),
    };
    line(out, tr.t(keys::LABEL_BUFFER_TANK), buffer);
    line(out, tr.t(keys::LABEL_FINAL_TANK), format!("{:.0} L", inst.final_tank_l));
}

/// RO 카탈로그 표를 만든다.
pub fn render_ro_catalog(tr: &Translator) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(keys::CATALOG_RO_HEADING));
    for unit in catalog::ro_catalog() {
        let _ = writeln!(
            out,
            "  {:<18} {:<10} {:>6.0} L/day  max {:>5.0} ppm  {:>3.0}%  {:.2} kW",
            unit.name,
            category_label(tr, unit.category),
            unit.nominal_production_l_day,
            unit.max_ppm,
            unit.recovery * 100.0,
            unit.power_kw
        );
    }
    out
}

/// 전처리 카탈로그 표를 만든다.
pub fn render_pretreatment_catalog(kind: PretreatmentKind, tr: &Translator) -> String {
    let heading_key = match kind {
        PretreatmentKind::Softener => keys::CATALOG_SOFTENER_HEADING,
        PretreatmentKind::Carbon => keys::CATALOG_CARBON_HEADING,
        PretreatmentKind::Sand => keys::CATALOG_SAND_HEADING,
    };
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.t(heading_key));
    for unit in catalog::pretreatment_catalog(kind) {
        let _ = writeln!(out, "  {}", pretreatment_row(unit));
    }
    out
}

fn pretreatment_row(unit: &PretreatmentUnit) -> String {
    let mut row = format!(
        "{:<26} {:<6} {:>4.0} L  {:>5.1} m3/h  backwash {:>5.1} m3/h  {}",
        unit.name,
        unit.vessel,
        unit.media_litres,
        unit.max_flow_m3h,
        unit.backwash_flow_m3h,
        valve_label(unit.valve)
    );
    if unit.kind == PretreatmentKind::Softener {
        let _ = write!(
            row,
            "  {:.0} °fH·m3  {:.1} kg/regen",
            unit.exchange_capacity, unit.salt_per_regen_kg
        );
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineeringParams;
    use crate::treatment::engine::size_installation;

    #[test]
    fn report_lists_selected_equipment() {
        let request = SizingRequest::default();
        let result = size_installation(&request, &EngineeringParams::default()).expect("valid");
        let text = render_report(&request, &result, &Translator::new("en"));
        assert!(text.contains("ALFA 140"), "{text}");
        assert!(text.contains("TWIN 40L DF IMPRESSION"), "{text}");
        assert!(text.contains("Installation requirements"), "{text}");
    }

    #[test]
    fn report_flags_no_solution() {
        let request = SizingRequest {
            feed_ppm: 9000.0,
            ..SizingRequest::default()
        };
        let result = size_installation(&request, &EngineeringParams::default()).expect("valid");
        let text = render_report(&request, &result, &Translator::new("en"));
        assert!(text.contains("No standard equipment"), "{text}");
        assert!(!text.contains("Operating costs"), "{text}");
    }

    #[test]
    fn catalog_table_has_one_row_per_unit() {
        let text = render_pretreatment_catalog(PretreatmentKind::Sand, &Translator::new("en"));
        assert_eq!(text.lines().count(), 1 + catalog::sand_catalog().len());
    }
}
