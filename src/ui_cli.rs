use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::report;
use crate::treatment::economics::CostRates;
use crate::treatment::engine::{size_installation, SizingRequest};
use crate::treatment::pretreatment::SourceType;
use crate::treatment::TreatmentTarget;

/// 대화형으로 조건을 입력받아 보고서를 출력한다. 입력 오류는 출력 후 다시 묻는다.
pub fn run_interactive(cfg: &Config, tr: &Translator) -> Result<(), AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompt = Prompt::new(stdin.lock(), stdout.lock());
    run_session(&mut prompt, cfg, tr)
}

/// 입력이 끝나면(EOF) `UnexpectedEof` 입출력 오류로 세션을 끝낸다.
pub fn run_session<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    cfg: &Config,
    tr: &Translator,
) -> Result<(), AppError> {
    loop {
        writeln!(prompt.output, "{}", tr.t(keys::INTERACTIVE_HEADING))?;
        let request = read_request(prompt, tr)?;
        match size_installation(&request, &cfg.engineering) {
            Ok(result) => write!(
                prompt.output,
                "{}",
                report::render_report(&request, &result, tr)
            )?,
            Err(err) => writeln!(prompt.output, "{}: {err}", tr.t(keys::ERROR_PREFIX))?,
        }
        if !prompt.read_yes_no(tr, tr.t(keys::INTERACTIVE_AGAIN), false)? {
            writeln!(prompt.output, "{}", tr.t(keys::APP_EXIT))?;
            break;
        }
    }
    Ok(())
}

/// 프롬프트 출력과 한 줄 입력을 묶는다.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::Io(io::ErrorKind::UnexpectedEof.into()));
        }
        Ok(buf)
    }

    fn read_f64(&mut self, tr: &Translator, prompt_key: &str) -> Result<f64, AppError> {
        loop {
            let s = self.read_line(tr.t(prompt_key))?;
            match s.trim().parse::<f64>() {
                Ok(v) => return Ok(v),
                Err(_) => writeln!(self.output, "{}", tr.t(keys::ERROR_INVALID_NUMBER))?,
            }
        }
    }

    fn read_yes_no(&mut self, tr: &Translator, question: &str, default: bool) -> Result<bool, AppError> {
        let answer = self.read_line(&format!("{question} {}: ", tr.t(keys::YES_NO_HINT)))?;
        Ok(parse_yes_no(&answer).unwrap_or(default))
    }
}

fn read_request<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    tr: &Translator,
) -> Result<SizingRequest, AppError> {
    let defaults = SizingRequest::default();
    let consumption_l_day = prompt.read_f64(tr, keys::PROMPT_CONSUMPTION)?;
    let feed_ppm = prompt.read_f64(tr, keys::PROMPT_FEED_PPM)?;
    let target_ppm = prompt.read_f64(tr, keys::PROMPT_TARGET_PPM)?;
    let hardness_hf = prompt.read_f64(tr, keys::PROMPT_HARDNESS)?;
    let temperature_c = prompt.read_f64(tr, keys::PROMPT_TEMPERATURE)?;
    let operating_hours = prompt.read_f64(tr, keys::PROMPT_OPERATING_HOURS)?;
    let peak_hours = prompt.read_f64(tr, keys::PROMPT_PEAK_HOURS)?;
    let source = match prompt.read_line(tr.t(keys::PROMPT_SOURCE))?.trim() {
        "2" => SourceType::Well,
        _ => SourceType::Mains,
    };
    let costs = CostRates {
        water_per_m3: prompt.read_f64(tr, keys::PROMPT_WATER_COST)?,
        salt_per_kg: prompt.read_f64(tr, keys::PROMPT_SALT_COST)?,
        electricity_per_kwh: prompt.read_f64(tr, keys::PROMPT_ELECTRICITY_COST)?,
    };
    let buffer_tank = prompt.read_yes_no(tr, tr.t(keys::PROMPT_BUFFER_TANK), defaults.buffer_tank)?;
    let softener_enabled =
        prompt.read_yes_no(tr, tr.t(keys::PROMPT_SOFTENER), defaults.softener_enabled)?;
    let final_tank_override_l = Some(prompt.read_f64(tr, keys::PROMPT_FINAL_TANK_OVERRIDE)?);
    let buffer_tank_override_l = if buffer_tank {
        Some(prompt.read_f64(tr, keys::PROMPT_BUFFER_TANK_OVERRIDE)?)
    } else {
        None
    };

    Ok(SizingRequest {
        consumption_l_day,
        feed_ppm,
        target: if target_ppm > 0.0 {
            TreatmentTarget::TargetSalinity(target_ppm)
        } else {
            TreatmentTarget::MaximumPurity
        },
        hardness_hf,
        temperature_c,
        operating_hours,
        peak_hours,
        source,
        costs,
        buffer_tank,
        softener_enabled,
        final_tank_override_l,
        buffer_tank_override_l,
    })
}

fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" | "예" | "네" | "1" => Some(true),
        "n" | "no" | "아니오" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(input: &str) -> (Result<(), AppError>, String) {
        let mut prompt = Prompt::new(input.as_bytes(), Vec::new());
        let result = run_session(&mut prompt, &Config::default(), &Translator::new("en"));
        let out = String::from_utf8(prompt.into_output()).expect("utf8");
        (result, out)
    }

    #[test]
    fn yes_no_accepts_korean_and_english() {
        assert_eq!(parse_yes_no("Y\n"), Some(true));
        assert_eq!(parse_yes_no("네"), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn closed_input_ends_the_session() {
        let (result, out) = session("");
        assert!(matches!(
            result,
            Err(AppError::Io(ref e)) if e.kind() == io::ErrorKind::UnexpectedEof
        ));
        assert_eq!(out.matches("Daily consumption").count(), 1, "{out}");
    }

    #[test]
    fn input_ending_mid_retry_does_not_loop() {
        let (result, out) = session("abc\n");
        assert!(result.is_err());
        assert_eq!(out.matches("Please enter a number.").count(), 1, "{out}");
    }

    #[test]
    fn full_session_prints_report() {
        let input = "2000\n800\n0\n35\n15\n24\n8\n1\n1.5\n0.45\n0.2\nn\ny\n0\nn\n";
        let (result, out) = session(input);
        assert!(result.is_ok(), "{out}");
        assert!(out.contains("ALFA 140"), "{out}");
        assert!(out.contains("TWIN 40L DF IMPRESSION"), "{out}");
        assert!(out.trim_end().ends_with("Exiting."), "{out}");
    }
}
