use std::fmt;

use serde::Serialize;

use super::demand::ConsumerRow;

const NORM_TOLERANCE: f64 = 1e-9;

/// 입력 데이터 점검 결과. 계산을 막거나 결과를 바꾸지 않는 권고 사항이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCheck {
    /// 소비자 그룹이 하나도 없음
    NoConsumers,
    /// 총·온수 일 원단위가 모두 0인 행 수
    ZeroNorms(usize),
    /// 근거 규범 문서가 비어 있는 행 수
    MissingSource(usize),
    /// 온수 원단위가 총 원단위를 넘는 행 수
    HotExceedsTotal(usize),
    /// 대수가 있는데 운전 시간이 0이고 최대시 원단위도 없는 행 수
    ZeroOperatingTime(usize),
}

impl fmt::Display for DataCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataCheck::NoConsumers => write!(f, "급수 소비자 그룹이 입력되지 않았습니다."),
            DataCheck::ZeroNorms(n) => {
                write!(f, "원단위가 없는 행(냉수·온수 = 0)이 있습니다: {n}")
            }
            DataCheck::MissingSource(n) => {
                write!(f, "근거 규범 문서가 없는 행이 있습니다: {n}")
            }
            DataCheck::HotExceedsTotal(n) => {
                write!(f, "원단위가 모순되는 행(온수 > 총)이 있습니다: {n}")
            }
            DataCheck::ZeroOperatingTime(n) => {
                write!(f, "대수가 있는데 운전 시간 T가 0인 행이 있습니다: {n}")
            }
        }
    }
}

fn hot_exceeds_total(row: &ConsumerRow) -> bool {
    let (norms, hourly) = (&row.norms, &row.hourly);
    (norms.total > 0.0 && norms.hot > norms.total + NORM_TOLERANCE)
        || (hourly.total > 0.0 && hourly.hot > hourly.total + NORM_TOLERANCE)
}

fn missing_operating_time(row: &ConsumerRow) -> bool {
    row.count > 0.0
        && row.t_hours <= 0.0
        && row.hourly.total <= 0.0
        && row.fixtures.total_l_h <= 0.0
}

/// 집계된 행을 점검해 권고 사항 목록을 만든다.
///
/// 원단위·최대시 원단위·단위 수는 입력값이 아니라 집계에서 확정된 값으로 본다.
pub fn data_checks(rows: &[ConsumerRow]) -> Vec<DataCheck> {
    let mut checks = Vec::new();
    if rows.is_empty() {
        checks.push(DataCheck::NoConsumers);
    }

    let zero_norms = rows
        .iter()
        .filter(|r| r.norms.cold == 0.0 && r.norms.hot == 0.0)
        .count();
    let missing_source = rows
        .iter()
        .filter(|r| r.source_doc.trim().is_empty())
        .count();
    let inconsistent = rows.iter().filter(|r| hot_exceeds_total(r)).count();
    let invalid_t = rows.iter().filter(|r| missing_operating_time(r)).count();

    for (n, check) in [
        (zero_norms, DataCheck::ZeroNorms(zero_norms)),
        (missing_source, DataCheck::MissingSource(missing_source)),
        (inconsistent, DataCheck::HotExceedsTotal(inconsistent)),
        (invalid_t, DataCheck::ZeroOperatingTime(invalid_t)),
    ] {
        if n > 0 {
            checks.push(check);
        }
    }
    checks
}
