use serde::Serialize;

use crate::catalog::PretreatmentUnit;
use crate::config::SoftenerPolicy;

/// 연수기 선정이 어느 단계에서 결정되었는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoftenerTier {
    /// 최소 자율 운전일을 만족
    Preferred,
    /// 만족하는 후보가 없어 최대 유량 후보를 용량 부족 상태로 선택
    Fallback,
}

/// 연수기 선정 입력.
#[derive(Debug, Clone)]
pub struct SoftenerDuty {
    /// 연수기를 통과하는 일 급수량 [L/day]
    pub feed_l_day: f64,
    /// 원수 경도 [°Hf]
    pub hardness_hf: f64,
    /// 전처리 설계 유량 [L/h]
    pub design_flow_lh: f64,
    /// 선정된 RO가 산업용인지
    pub industrial_ro: bool,
    /// 일 사용량 [L/day]
    pub consumption_l_day: f64,
}

impl SoftenerDuty {
    /// 일 경도 부하 [°Hf·m3/day]
    pub fn daily_load(&self) -> f64 {
        self.feed_l_day / 1000.0 * self.hardness_hf
    }

    fn industrial_duty(&self, policy: &SoftenerPolicy) -> bool {
        self.industrial_ro && self.consumption_l_day > policy.industrial_consumption_threshold_l
    }
}

/// 연수기 선정 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SoftenerSelection {
    pub unit: PretreatmentUnit,
    /// 재생 주기 [day]
    pub autonomy_days: f64,
    /// 일 경도 부하 [°Hf·m3/day]
    pub daily_load: f64,
    pub tier: SoftenerTier,
    /// 적용된 최소 자율 운전일 기준
    pub required_days: f64,
}

fn duplex_rank(unit: &PretreatmentUnit, industrial_ro: bool) -> u8 {
    if unit.is_duplex() && industrial_ro {
        0
    } else {
        1
    }
}

/// 재생 주기 = 교환 용량 / 일 경도 부하. 부하가 0이면 정책의 대체값을 쓴다.
pub fn autonomy_days(exchange_capacity: f64, daily_load: f64, policy: &SoftenerPolicy) -> f64 {
    if daily_load > 0.0 {
        exchange_capacity / daily_load
    } else {
        policy.no_load_days
    }
}

/// 연수기를 선정한다.
///
/// 유량 조건을 만족하는 후보 중 자율 운전일 기준을 통과한 것을
/// (산업용 RO일 때 Duplex 우선, 수지량 오름차순)으로 정렬해 첫 번째를 고른다.
/// 통과 후보가 없으면 최대 유량(동률이면 교환 용량이 큰) 후보를 `Fallback`으로 반환한다.
/// 유량 조건을 만족하는 후보 자체가 없으면 `None`.
pub fn select_softener(
    catalog: &[PretreatmentUnit],
    duty: &SoftenerDuty,
    policy: &SoftenerPolicy,
) -> Option<SoftenerSelection> {
    let load = duty.daily_load();
    let industrial = duty.industrial_duty(policy);
    let required_days = if industrial {
        policy.industrial_min_days
    } else {
        policy.domestic_min_days
    };

    let eligible: Vec<(&PretreatmentUnit, f64)> = catalog
        .iter()
        .filter(|unit| unit.max_flow_lh() >= duty.design_flow_lh)
        .map(|unit| (unit, autonomy_days(unit.exchange_capacity, load, policy)))
        .collect();

    let mut viable: Vec<&(&PretreatmentUnit, f64)> = eligible
        .iter()
        .filter(|(unit, days)| {
            if industrial {
                (policy.duplex_override && unit.is_duplex()) || *days > policy.industrial_min_days
            } else {
                *days >= policy.domestic_min_days
            }
        })
        .collect();
    // sort_by는 안정 정렬이므로 동률은 카탈로그 순서를 유지한다.
    viable.sort_by(|(a, _), (b, _)| {
        duplex_rank(a, duty.industrial_ro)
            .cmp(&duplex_rank(b, duty.industrial_ro))
            .then(a.media_litres.total_cmp(&b.media_litres))
    });

    if let Some((unit, days)) = viable.first() {
        return Some(SoftenerSelection {
            unit: (*unit).clone(),
            autonomy_days: *days,
            daily_load: load,
            tier: SoftenerTier::Preferred,
            required_days,
        });
    }

    let mut largest: Option<&(&PretreatmentUnit, f64)> = None;
    for entry in &eligible {
        let better = match largest {
            None => true,
            Some((best, _)) => {
                entry.0.max_flow_m3h > best.max_flow_m3h
                    || (entry.0.max_flow_m3h == best.max_flow_m3h
                        && entry.0.exchange_capacity > best.exchange_capacity)
            }
        };
        if better {
            largest = Some(entry);
        }
    }
    let (unit, days) = largest?;
    tracing::warn!(
        unit = unit.name,
        autonomy_days = *days,
        required_days,
        "softener autonomy below target, using largest unit"
    );
    Some(SoftenerSelection {
        unit: (*unit).clone(),
        autonomy_days: *days,
        daily_load: load,
        tier: SoftenerTier::Fallback,
        required_days,
    })
}
