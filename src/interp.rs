//! 표 보간 공용 루틴. 점도표, 피크계수 표(B.1/B.2) 모두 여기 보간기를 공유한다.
//!
//! 모든 보간은 표 범위 밖에서 외삽하지 않고 가장자리 값으로 클램프한다.

/// 음수·NaN·무한대를 0으로 정리한 값을 돌려준다.
///
/// 입력 필드는 사용 전에 반드시 이 함수를 거친다. 음수가 계산에 전파되지 않게 한다.
pub fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// 분모가 0 이하이면 0을 돌려주는 나눗셈.
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// `(x, y)` 점 목록에서 선형 보간한다. 점은 x 오름차순이어야 한다.
pub fn linear(points: &[(f64, f64)], x: f64) -> f64 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return 0.0,
    };
    if x.is_nan() || x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    for win in points.windows(2) {
        let (x1, y1) = win[0];
        let (x2, y2) = win[1];
        if x >= x1 && x <= x2 {
            if x == x2 {
                return y2;
            }
            if x2 == x1 {
                return y1;
            }
            let frac = (x - x1) / (x2 - x1);
            return y1 + frac * (y2 - y1);
        }
    }
    last.1
}

/// 키 배열에서 `x`를 감싸는 두 인덱스를 찾는다.
///
/// 범위 밖이거나 키와 정확히 일치하면 같은 인덱스 두 개를 돌려준다.
fn bracket(keys: &[f64], x: f64) -> (usize, usize) {
    let last = keys.len().saturating_sub(1);
    let hi = keys.iter().position(|k| *k >= x).unwrap_or(keys.len());
    if hi == 0 {
        (0, 0)
    } else if hi > last {
        (last, last)
    } else if keys[hi] == x {
        (hi, hi)
    } else {
        (hi - 1, hi)
    }
}

/// 행 키 × 열 키로 정의된 불규칙 2차원 격자.
///
/// `rows`의 각 항목은 `(행 키, 열별 값)`이다. 행 키와 열 키 모두 오름차순.
#[derive(Debug, Clone, Copy)]
pub struct Grid<'a, const C: usize> {
    pub cols: &'a [f64; C],
    pub rows: &'a [(f64, [f64; C])],
}

impl<const C: usize> Grid<'_, C> {
    /// 행 키 목록.
    pub fn row_keys(&self) -> Vec<f64> {
        self.rows.iter().map(|(k, _)| *k).collect()
    }

    /// 쌍선형 보간. 각 축은 표 범위로 클램프된다.
    ///
    /// 질의점이 격자선 위에 있으면 해당 축 방향 1차원 보간으로 축퇴한다.
    pub fn bilinear(&self, row: f64, col: f64) -> f64 {
        if self.rows.is_empty() || C == 0 {
            return 0.0;
        }
        let row_keys = self.row_keys();
        let row = clamp_to(&row_keys, row);
        let col = clamp_to(self.cols, col);

        let (r1, r2) = bracket(&row_keys, row);
        let (c1, c2) = bracket(self.cols, col);

        let q11 = self.rows[r1].1[c1];
        let q12 = self.rows[r1].1[c2];
        let q21 = self.rows[r2].1[c1];
        let q22 = self.rows[r2].1[c2];

        let (n1, n2) = (row_keys[r1], row_keys[r2]);
        let (p1, p2) = (self.cols[c1], self.cols[c2]);

        if r1 == r2 && c1 == c2 {
            return q11;
        }
        if r1 == r2 {
            let tp = (col - p1) / (p2 - p1);
            return q11 + (q12 - q11) * tp;
        }
        if c1 == c2 {
            let tn = (row - n1) / (n2 - n1);
            return q11 + (q21 - q11) * tn;
        }

        let tn = (row - n1) / (n2 - n1);
        let tp = (col - p1) / (p2 - p1);
        let qn1 = q11 + (q21 - q11) * tn;
        let qn2 = q12 + (q22 - q12) * tn;
        qn1 + (qn2 - qn1) * tp
    }
}

fn clamp_to(keys: &[f64], x: f64) -> f64 {
    match (keys.first(), keys.last()) {
        (Some(lo), Some(hi)) if x.is_finite() => x.clamp(*lo, *hi),
        (Some(_), Some(hi)) if x == f64::INFINITY => *hi,
        (Some(lo), _) => *lo,
        _ => x,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: [(f64, f64); 3] = [(0.0, 1.0), (1.0, 3.0), (3.0, 4.0)];

    const COLS: [f64; 3] = [0.0, 1.0, 2.0];
    const ROWS: [(f64, [f64; 3]); 2] = [(10.0, [1.0, 2.0, 3.0]), (20.0, [2.0, 4.0, 6.0])];

    #[test]
    fn linear_clamps_at_both_ends() {
        assert_eq!(linear(&POINTS, -5.0), 1.0);
        assert_eq!(linear(&POINTS, 10.0), 4.0);
        assert_eq!(linear(&[], 1.0), 0.0);
    }

    #[test]
    fn linear_interpolates_inside() {
        assert!((linear(&POINTS, 0.5) - 2.0).abs() < 1e-12);
        assert!((linear(&POINTS, 2.0) - 3.5).abs() < 1e-12);
    }

    #[test]
    fn bilinear_hits_grid_points_exactly() {
        let grid = Grid { cols: &COLS, rows: &ROWS };
        assert_eq!(grid.bilinear(20.0, 1.0), 4.0);
        assert_eq!(grid.bilinear(10.0, 2.0), 3.0);
    }

    #[test]
    fn bilinear_degenerates_on_grid_lines() {
        let grid = Grid { cols: &COLS, rows: &ROWS };
        // 행 고정, 열 방향만 보간
        assert!((grid.bilinear(10.0, 0.5) - 1.5).abs() < 1e-12);
        // 열 고정, 행 방향만 보간
        assert!((grid.bilinear(15.0, 2.0) - 4.5).abs() < 1e-12);
        // 일반 내부점
        assert!((grid.bilinear(15.0, 0.5) - 2.25).abs() < 1e-12);
    }

    #[test]
    fn bilinear_clamps_outside() {
        let grid = Grid { cols: &COLS, rows: &ROWS };
        assert_eq!(grid.bilinear(0.0, -1.0), 1.0);
        assert_eq!(grid.bilinear(100.0, 9.0), 6.0);
    }
}
