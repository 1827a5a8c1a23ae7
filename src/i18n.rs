use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const YES_NO_HINT: &str = "general.yes_no_hint";

    pub const PROMPT_CONSUMPTION: &str = "prompt.consumption";
    pub const PROMPT_FEED_PPM: &str = "prompt.feed_ppm";
    pub const PROMPT_TARGET_PPM: &str = "prompt.target_ppm";
    pub const PROMPT_HARDNESS: &str = "prompt.hardness";
    pub const PROMPT_TEMPERATURE: &str = "prompt.temperature";
    pub const PROMPT_OPERATING_HOURS: &str = "prompt.operating_hours";
    pub const PROMPT_PEAK_HOURS: &str = "prompt.peak_hours";
    pub const PROMPT_SOURCE: &str = "prompt.source";
    pub const PROMPT_WATER_COST: &str = "prompt.water_cost";
    pub const PROMPT_SALT_COST: &str = "prompt.salt_cost";
    pub const PROMPT_ELECTRICITY_COST: &str = "prompt.electricity_cost";
    pub const PROMPT_BUFFER_TANK: &str = "prompt.buffer_tank";
    pub const PROMPT_SOFTENER: &str = "prompt.softener";
    pub const PROMPT_FINAL_TANK_OVERRIDE: &str = "prompt.final_tank_override";
    pub const PROMPT_BUFFER_TANK_OVERRIDE: &str = "prompt.buffer_tank_override";
    pub const INTERACTIVE_HEADING: &str = "interactive.heading";
    pub const INTERACTIVE_AGAIN: &str = "interactive.again";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_SECTION_PARAMETERS: &str = "report.section_parameters";
    pub const REPORT_SECTION_EQUIPMENT: &str = "report.section_equipment";
    pub const REPORT_SECTION_FLOWS: &str = "report.section_flows";
    pub const REPORT_SECTION_COSTS: &str = "report.section_costs";
    pub const REPORT_SECTION_INSTALLATION: &str = "report.section_installation";
    pub const REPORT_SECTION_ADVISORIES: &str = "report.section_advisories";
    pub const REPORT_NO_SOLUTION: &str = "report.no_solution";
    pub const REPORT_NONE: &str = "report.none";
    pub const REPORT_NOT_REQUIRED: &str = "report.not_required";

    pub const LABEL_CONSUMPTION: &str = "label.consumption";
    pub const LABEL_FEED_PPM: &str = "label.feed_ppm";
    pub const LABEL_TARGET: &str = "label.target";
    pub const LABEL_TARGET_MAX: &str = "label.target_max";
    pub const LABEL_BLEND: &str = "label.blend";
    pub const LABEL_HARDNESS: &str = "label.hardness";
    pub const LABEL_TEMPERATURE: &str = "label.temperature";
    pub const LABEL_SOURCE: &str = "label.source";
    pub const LABEL_SOURCE_MAINS: &str = "label.source_mains";
    pub const LABEL_SOURCE_WELL: &str = "label.source_well";
    pub const LABEL_HOURS: &str = "label.hours";
    pub const LABEL_MODE: &str = "label.mode";
    pub const LABEL_MODE_DIRECT: &str = "label.mode_direct";
    pub const LABEL_MODE_BUFFERED: &str = "label.mode_buffered";
    pub const LABEL_RO: &str = "label.ro";
    pub const LABEL_SOFTENER: &str = "label.softener";
    pub const LABEL_CARBON: &str = "label.carbon";
    pub const LABEL_SAND: &str = "label.sand";
    pub const LABEL_DOMESTIC: &str = "label.domestic";
    pub const LABEL_INDUSTRIAL: &str = "label.industrial";
    pub const LABEL_DERATED: &str = "label.derated";
    pub const LABEL_REGENERATION: &str = "label.regeneration";
    pub const LABEL_LOAD_RATIO: &str = "label.load_ratio";
    pub const LABEL_FEED: &str = "label.feed";
    pub const LABEL_REJECT: &str = "label.reject";
    pub const LABEL_BYPASS: &str = "label.bypass";
    pub const LABEL_PRODUCTION: &str = "label.production";
    pub const LABEL_PEAK_INTAKE: &str = "label.peak_intake";
    pub const LABEL_DESIGN_FLOW: &str = "label.design_flow";
    pub const LABEL_WATER_COST: &str = "label.water_cost";
    pub const LABEL_SALT_COST: &str = "label.salt_cost";
    pub const LABEL_ELECTRICITY_COST: &str = "label.electricity_cost";
    pub const LABEL_TOTAL_COST: &str = "label.total_cost";
    pub const LABEL_MIN_FEED: &str = "label.min_feed";
    pub const LABEL_PIPE: &str = "label.pipe";
    pub const LABEL_BUFFER_TANK: &str = "label.buffer_tank";
    pub const LABEL_FINAL_TANK: &str = "label.final_tank";

    pub const CATALOG_RO_HEADING: &str = "catalog.ro_heading";
    pub const CATALOG_SOFTENER_HEADING: &str = "catalog.softener_heading";
    pub const CATALOG_CARBON_HEADING: &str = "catalog.carbon_heading";
    pub const CATALOG_SAND_HEADING: &str = "catalog.sand_heading";

    pub const ADVISORY_NO_STANDARD_RO: &str = "advisory.no_standard_ro";
    pub const ADVISORY_HIGH_SALINITY: &str = "advisory.high_salinity";
    pub const ADVISORY_TARGET_BELOW_PERMEATE: &str = "advisory.target_below_permeate";
    pub const ADVISORY_RO_NOT_REQUIRED: &str = "advisory.ro_not_required";
    pub const ADVISORY_ANTISCALANT: &str = "advisory.antiscalant";
    pub const ADVISORY_SOFTENER_UNDERSIZED: &str = "advisory.softener_undersized";
    pub const ADVISORY_SOFTENER_OUT_OF_RANGE: &str = "advisory.softener_out_of_range";
    pub const ADVISORY_CARBON_OUT_OF_RANGE: &str = "advisory.carbon_out_of_range";
    pub const ADVISORY_SAND_OUT_OF_RANGE: &str = "advisory.sand_out_of_range";
    pub const ADVISORY_FLOW_DEFICIT: &str = "advisory.flow_deficit";
    pub const ADVISORY_RUN_HOURS: &str = "advisory.run_hours";
    pub const ADVISORY_PIPE_VELOCITY: &str = "advisory.pipe_velocity";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.trim().to_lowercase().starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어팩 디렉터리(`<dir>/<code>.toml`)의 문자열로 내장 문자열을 덮어쓴다.
    /// 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// `{name}` 자리표시자를 값으로 채운다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "ko".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 섹션 테이블.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let path = dir.join(format!("{lang}.toml"));
    let content = fs::read_to_string(&path).ok()?;
    let map = parse_toml_to_map(&content);
    if map.is_none() {
        tracing::warn!(path = %path.display(), "language pack is empty or invalid");
    }
    map
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        YES_NO_HINT => "(y/n)",
        PROMPT_CONSUMPTION => "일 사용량 [L/day]: ",
        PROMPT_FEED_PPM => "원수 염도 TDS [ppm]: ",
        PROMPT_TARGET_PPM => "목표 생산수 염도 [ppm] (최대 처리는 0): ",
        PROMPT_HARDNESS => "원수 경도 [°fH]: ",
        PROMPT_TEMPERATURE => "수온 [°C]: ",
        PROMPT_OPERATING_HOURS => "하루 가용 운전 시간 [h]: ",
        PROMPT_PEAK_HOURS => "피크 사용 시간 [h]: ",
        PROMPT_SOURCE => "원수 공급원 1=상수도 2=지하수: ",
        PROMPT_WATER_COST => "용수 단가 [€/m3]: ",
        PROMPT_SALT_COST => "소금 단가 [€/kg]: ",
        PROMPT_ELECTRICITY_COST => "전력 단가 [€/kWh]: ",
        PROMPT_BUFFER_TANK => "버퍼 탱크 사용",
        PROMPT_SOFTENER => "연수기 사용",
        PROMPT_FINAL_TANK_OVERRIDE => "최종 탱크 수동 지정 [L] (자동은 0): ",
        PROMPT_BUFFER_TANK_OVERRIDE => "버퍼 탱크 수동 지정 [L] (자동은 0): ",
        INTERACTIVE_HEADING => "\n=== 수처리 장비 사이징 ===",
        INTERACTIVE_AGAIN => "다른 조건으로 다시 계산",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        REPORT_TITLE => "수처리 설비 사이징 보고서",
        REPORT_SECTION_PARAMETERS => "설계 조건",
        REPORT_SECTION_EQUIPMENT => "선정 장비",
        REPORT_SECTION_FLOWS => "물수지",
        REPORT_SECTION_COSTS => "운전비",
        REPORT_SECTION_INSTALLATION => "설치 요구사항",
        REPORT_SECTION_ADVISORIES => "권고 사항",
        REPORT_NO_SOLUTION => "표준 장비로는 해결할 수 없는 조건입니다.",
        REPORT_NONE => "해당 없음",
        REPORT_NOT_REQUIRED => "불필요",
        LABEL_CONSUMPTION => "일 사용량",
        LABEL_FEED_PPM => "원수 염도",
        LABEL_TARGET => "목표 염도",
        LABEL_TARGET_MAX => "최대 처리",
        LABEL_BLEND => "RO 비율",
        LABEL_HARDNESS => "경도",
        LABEL_TEMPERATURE => "수온",
        LABEL_SOURCE => "공급원",
        LABEL_SOURCE_MAINS => "상수도",
        LABEL_SOURCE_WELL => "지하수",
        LABEL_HOURS => "운전/피크 시간",
        LABEL_MODE => "전처리 방식",
        LABEL_MODE_DIRECT => "직결",
        LABEL_MODE_BUFFERED => "버퍼 탱크",
        LABEL_RO => "역삼투",
        LABEL_SOFTENER => "연수기",
        LABEL_CARBON => "활성탄 여과기",
        LABEL_SAND => "모래 여과기",
        LABEL_DOMESTIC => "가정용",
        LABEL_INDUSTRIAL => "산업용",
        LABEL_DERATED => "보정 용량",
        LABEL_REGENERATION => "재생 주기",
        LABEL_LOAD_RATIO => "부하율",
        LABEL_FEED => "총 급수량",
        LABEL_REJECT => "농축수",
        LABEL_BYPASS => "바이패스",
        LABEL_PRODUCTION => "RO 실생산",
        LABEL_PEAK_INTAKE => "RO 피크 흡입 유량",
        LABEL_DESIGN_FLOW => "전처리 설계 유량",
        LABEL_WATER_COST => "용수비",
        LABEL_SALT_COST => "소금비",
        LABEL_ELECTRICITY_COST => "전력비",
        LABEL_TOTAL_COST => "합계",
        LABEL_MIN_FEED => "최소 공급 유량",
        LABEL_PIPE => "추천 배관",
        LABEL_BUFFER_TANK => "버퍼 탱크",
        LABEL_FINAL_TANK => "최종 탱크",
        CATALOG_RO_HEADING => "-- 역삼투 장비 --",
        CATALOG_SOFTENER_HEADING => "-- 연수기 --",
        CATALOG_CARBON_HEADING => "-- 활성탄 여과기 --",
        CATALOG_SAND_HEADING => "-- 모래 여과기 --",
        ADVISORY_NO_STANDARD_RO => {
            "원수 염도 {ppm} ppm, 생산량 {liters} L/day 조건을 만족하는 표준 RO 장비가 없습니다."
        }
        ADVISORY_HIGH_SALINITY => {
            "원수 염도 {ppm} ppm은 고염도 조건이므로 회수율을 {factor}배로 낮춰 계산했습니다."
        }
        ADVISORY_TARGET_BELOW_PERMEATE => {
            "목표 염도 {requested} ppm은 RO 투과수 수준({achievable} ppm)보다 낮아 보정했습니다."
        }
        ADVISORY_RO_NOT_REQUIRED => {
            "목표 염도 {target} ppm이 원수 {ppm} ppm 이상이므로 전량 바이패스합니다. RO는 예비 설비로 산정했습니다."
        }
        ADVISORY_ANTISCALANT => "경도 {hardness} °fH: 연수기 대신 스케일 방지제 주입을 가정합니다.",
        ADVISORY_SOFTENER_UNDERSIZED => {
            "연수기 재생 주기 {days}일이 기준 {required}일에 못 미칩니다. 최대 용량 장비를 선정했습니다."
        }
        ADVISORY_SOFTENER_OUT_OF_RANGE => {
            "설계 유량 {flow} L/h는 표준 연수기 범위를 벗어납니다. 별도 설계가 필요합니다."
        }
        ADVISORY_CARBON_OUT_OF_RANGE => {
            "설계 유량 {flow} L/h는 표준 활성탄 여과기 범위를 벗어납니다. 약품 주입 등 대안을 검토하세요."
        }
        ADVISORY_SAND_OUT_OF_RANGE => {
            "설계 유량 {flow} L/h는 표준 모래 여과기 범위를 벗어납니다. 별도 설계가 필요합니다."
        }
        ADVISORY_FLOW_DEFICIT => "피크 시간 유량 부족 {deficit} L/h: 제품수 저장 탱크가 필요합니다.",
        ADVISORY_RUN_HOURS => "RO 필요 운전 시간 {hours} h가 가용 시간 {available} h를 초과합니다.",
        ADVISORY_PIPE_VELOCITY => "배관 유속 {velocity} m/s가 허용치 {limit} m/s를 초과합니다.",
        _ => "??",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    let s = match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        YES_NO_HINT => "(y/n)",
        PROMPT_CONSUMPTION => "Daily consumption [L/day]: ",
        PROMPT_FEED_PPM => "Feed TDS [ppm]: ",
        PROMPT_TARGET_PPM => "Target product TDS [ppm] (0 = maximum treatment): ",
        PROMPT_HARDNESS => "Feed hardness [°fH]: ",
        PROMPT_TEMPERATURE => "Water temperature [°C]: ",
        PROMPT_OPERATING_HOURS => "Available operating hours per day [h]: ",
        PROMPT_PEAK_HOURS => "Peak demand hours [h]: ",
        PROMPT_SOURCE => "Water source 1=mains 2=well: ",
        PROMPT_WATER_COST => "Water cost [€/m3]: ",
        PROMPT_SALT_COST => "Salt cost [€/kg]: ",
        PROMPT_ELECTRICITY_COST => "Electricity cost [€/kWh]: ",
        PROMPT_BUFFER_TANK => "Use buffer tank",
        PROMPT_SOFTENER => "Use softener",
        PROMPT_FINAL_TANK_OVERRIDE => "Final tank override [L] (0 = automatic): ",
        PROMPT_BUFFER_TANK_OVERRIDE => "Buffer tank override [L] (0 = automatic): ",
        INTERACTIVE_HEADING => "\n=== Water Treatment Sizing ===",
        INTERACTIVE_AGAIN => "Run another calculation",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        REPORT_TITLE => "Water Treatment Sizing Report",
        REPORT_SECTION_PARAMETERS => "Design parameters",
        REPORT_SECTION_EQUIPMENT => "Selected equipment",
        REPORT_SECTION_FLOWS => "Flow balance",
        REPORT_SECTION_COSTS => "Operating costs",
        REPORT_SECTION_INSTALLATION => "Installation requirements",
        REPORT_SECTION_ADVISORIES => "Advisories",
        REPORT_NO_SOLUTION => "No standard equipment solves this configuration.",
        REPORT_NONE => "none",
        REPORT_NOT_REQUIRED => "not required",
        LABEL_CONSUMPTION => "Consumption",
        LABEL_FEED_PPM => "Feed TDS",
        LABEL_TARGET => "Target TDS",
        LABEL_TARGET_MAX => "maximum treatment",
        LABEL_BLEND => "RO share",
        LABEL_HARDNESS => "Hardness",
        LABEL_TEMPERATURE => "Temperature",
        LABEL_SOURCE => "Source",
        LABEL_SOURCE_MAINS => "mains",
        LABEL_SOURCE_WELL => "well",
        LABEL_HOURS => "Operating/peak hours",
        LABEL_MODE => "Pretreatment mode",
        LABEL_MODE_DIRECT => "direct",
        LABEL_MODE_BUFFERED => "buffer tank",
        LABEL_RO => "Reverse osmosis",
        LABEL_SOFTENER => "Softener",
        LABEL_CARBON => "Carbon filter",
        LABEL_SAND => "Sand filter",
        LABEL_DOMESTIC => "domestic",
        LABEL_INDUSTRIAL => "industrial",
        LABEL_DERATED => "derated capacity",
        LABEL_REGENERATION => "regeneration every",
        LABEL_LOAD_RATIO => "load",
        LABEL_FEED => "Total feed",
        LABEL_REJECT => "Reject",
        LABEL_BYPASS => "Bypass",
        LABEL_PRODUCTION => "RO real production",
        LABEL_PEAK_INTAKE => "RO peak intake",
        LABEL_DESIGN_FLOW => "Pretreatment design flow",
        LABEL_WATER_COST => "Water",
        LABEL_SALT_COST => "Salt",
        LABEL_ELECTRICITY_COST => "Electricity",
        LABEL_TOTAL_COST => "Total",
        LABEL_MIN_FEED => "Minimum feed flow",
        LABEL_PIPE => "Recommended pipe",
        LABEL_BUFFER_TANK => "Buffer tank",
        LABEL_FINAL_TANK => "Final tank",
        CATALOG_RO_HEADING => "-- Reverse osmosis units --",
        CATALOG_SOFTENER_HEADING => "-- Softeners --",
        CATALOG_CARBON_HEADING => "-- Carbon filters --",
        CATALOG_SAND_HEADING => "-- Sand filters --",
        ADVISORY_NO_STANDARD_RO => {
            "No standard RO unit handles {ppm} ppm feed at {liters} L/day."
        }
        ADVISORY_HIGH_SALINITY => {
            "Feed TDS {ppm} ppm is high; recovery was derated by a factor of {factor}."
        }
        ADVISORY_TARGET_BELOW_PERMEATE => {
            "Target {requested} ppm is below RO permeate quality; raised to {achievable} ppm."
        }
        ADVISORY_RO_NOT_REQUIRED => {
            "Target {target} ppm is at or above the {ppm} ppm feed: all water is bypassed and the RO unit is sized as standby."
        }
        ADVISORY_ANTISCALANT => "Hardness {hardness} °fH: antiscalant dosing assumed instead of a softener.",
        ADVISORY_SOFTENER_UNDERSIZED => {
            "Softener autonomy {days} days is below the {required}-day target; largest unit selected."
        }
        ADVISORY_SOFTENER_OUT_OF_RANGE => {
            "Design flow {flow} L/h exceeds every standard softener; custom design required."
        }
        ADVISORY_CARBON_OUT_OF_RANGE => {
            "Design flow {flow} L/h exceeds every standard carbon filter; consider chemical dosing."
        }
        ADVISORY_SAND_OUT_OF_RANGE => {
            "Design flow {flow} L/h exceeds every standard sand filter; custom design required."
        }
        ADVISORY_FLOW_DEFICIT => "Peak flow deficit of {deficit} L/h: product storage is required.",
        ADVISORY_RUN_HOURS => "RO needs {hours} h/day but only {available} h are available.",
        ADVISORY_PIPE_VELOCITY => "Pipe velocity {velocity} m/s exceeds the {limit} m/s limit.",
        _ => return None,
    };
    Some(s)
}
