//! 확률 P와 기구 수 N으로 최대 유량 계수 α를 구한다.
//!
//! - 표 B.1: P > 0.1 이고 N ≤ 200 일 때 α = f(N, P), 쌍선형 보간
//! - 표 B.2: 그 밖의 모든 경우 α = f(NP), 선형 보간
//!
//! 두 표 사이 경계(P = 0.1, N = 200)는 규범값이므로 섞지 않고 정확히 나눈다.

use serde::Serialize;

use crate::interp::{self, Grid};

/// 표 B.1 적용 확률 하한 (초과해야 B.1).
pub const TABLE_B1_P_MIN: f64 = 0.1;
/// 표 B.1 적용 N 상한 (이하이면 B.1).
pub const TABLE_B1_N_MAX: f64 = 200.0;

/// α 조회에 사용된 표.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaTable {
    /// 표 B.1, (N, P) 격자
    B1,
    /// 표 B.2, NP 곡선
    B2,
}

/// α 조회 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlphaLookup {
    pub alpha: f64,
    pub table: AlphaTable,
}

const B1_P_GRID: [f64; 10] = [0.1, 0.125, 0.16, 0.2, 0.25, 0.316, 0.4, 0.5, 0.63, 0.8];

#[rustfmt::skip]
const B1_ROWS: [(f64, [f64; 10]); 52] = [
    (2.0,   [0.39, 0.39, 0.40, 0.40, 0.40, 0.40, 0.40, 0.40, 0.40, 0.40]),
    (4.0,   [0.58, 0.62, 0.65, 0.69, 0.72, 0.76, 0.78, 0.80, 0.80, 0.80]),
    (6.0,   [0.72, 0.78, 0.83, 0.90, 0.97, 1.04, 1.11, 1.16, 1.20, 1.20]),
    (8.0,   [0.84, 0.91, 0.99, 1.08, 1.18, 1.29, 1.39, 1.50, 1.58, 1.59]),
    (10.0,  [0.95, 1.04, 1.14, 1.25, 1.38, 1.52, 1.66, 1.81, 1.94, 1.97]),
    (12.0,  [1.05, 1.15, 1.28, 1.41, 1.57, 1.74, 1.92, 2.11, 2.29, 2.36]),
    (14.0,  [1.14, 1.27, 1.41, 1.57, 1.75, 1.95, 2.17, 2.40, 2.63, 2.75]),
    (16.0,  [1.25, 1.37, 1.53, 1.71, 1.92, 2.15, 2.41, 2.69, 2.96, 3.14]),
    (18.0,  [1.32, 1.47, 1.65, 1.85, 2.09, 2.35, 2.55, 2.97, 3.24, 3.53]),
    (20.0,  [1.41, 1.57, 1.77, 1.99, 2.25, 2.55, 2.88, 3.24, 3.60, 3.92]),
    (22.0,  [1.49, 1.67, 1.88, 2.13, 2.41, 2.74, 3.11, 3.51, 3.94, 4.33]),
    (24.0,  [1.57, 1.77, 2.00, 2.26, 2.57, 2.93, 3.33, 3.78, 4.27, 4.70]),
    (26.0,  [1.64, 1.86, 2.11, 2.39, 2.73, 3.11, 3.55, 4.04, 4.60, 5.11]),
    (28.0,  [1.72, 1.95, 2.21, 2.52, 2.88, 3.30, 3.77, 4.30, 4.94, 5.51]),
    (30.0,  [1.80, 2.04, 2.32, 2.65, 3.03, 3.48, 3.99, 4.56, 5.27, 5.89]),
    (32.0,  [1.87, 2.13, 2.43, 2.77, 3.18, 3.66, 4.20, 4.82, 5.60, 6.24]),
    (34.0,  [1.94, 2.21, 2.53, 2.90, 3.33, 3.84, 4.42, 5.08, 5.92, 6.65]),
    (36.0,  [2.02, 2.30, 2.63, 3.02, 3.48, 4.02, 4.63, 5.33, 6.23, 7.02]),
    (38.0,  [2.09, 2.38, 2.73, 3.14, 3.62, 4.20, 4.84, 5.58, 6.60, 7.43]),
    (40.0,  [2.16, 2.47, 2.83, 3.26, 3.77, 4.38, 5.05, 5.83, 6.91, 7.84]),
    (45.0,  [2.33, 2.67, 3.08, 3.53, 4.12, 4.78, 5.55, 6.45, 7.72, 8.87]),
    (50.0,  [2.50, 2.88, 3.32, 3.80, 4.47, 5.18, 6.05, 7.07, 8.52, 9.90]),
    (55.0,  [2.66, 3.07, 3.56, 4.07, 4.82, 5.58, 6.55, 7.69, 9.40, 10.80]),
    (60.0,  [2.83, 3.27, 3.79, 4.34, 5.16, 5.98, 7.05, 8.31, 10.20, 11.80]),
    (65.0,  [2.99, 3.46, 4.02, 4.61, 5.50, 6.38, 7.55, 8.93, 11.00, 12.70]),
    (70.0,  [3.14, 3.65, 4.25, 4.88, 5.83, 6.78, 8.05, 9.55, 11.70, 13.70]),
    (75.0,  [3.30, 3.84, 4.48, 5.15, 6.16, 7.18, 8.55, 10.17, 12.50, 14.70]),
    (80.0,  [3.45, 4.02, 4.70, 5.42, 6.49, 7.58, 9.06, 10.79, 13.40, 15.70]),
    (85.0,  [3.60, 4.20, 4.92, 5.69, 6.82, 7.98, 9.57, 11.41, 14.20, 16.80]),
    (90.0,  [3.75, 4.38, 5.14, 5.96, 7.15, 8.38, 10.08, 12.04, 14.90, 17.70]),
    (95.0,  [3.90, 4.56, 5.36, 6.23, 7.48, 8.78, 10.59, 12.67, 15.60, 18.60]),
    (100.0, [4.05, 4.74, 5.58, 6.50, 7.81, 9.18, 11.10, 13.30, 16.50, 19.60]),
    (105.0, [4.20, 4.92, 5.80, 6.77, 8.14, 9.58, 11.61, 13.93, 17.20, 20.60]),
    (110.0, [4.35, 5.10, 6.02, 7.04, 8.47, 9.99, 12.12, 14.56, 18.00, 21.60]),
    (115.0, [4.50, 5.28, 6.24, 7.31, 8.80, 10.40, 12.63, 15.19, 18.80, 22.60]),
    (120.0, [4.65, 5.46, 6.46, 7.58, 9.13, 10.81, 13.14, 15.87, 19.50, 23.60]),
    (125.0, [4.80, 5.64, 6.68, 7.85, 9.46, 11.22, 13.65, 16.45, 20.20, 24.60]),
    (130.0, [4.95, 5.82, 6.90, 8.12, 9.79, 11.63, 14.16, 17.08, 21.00, 25.50]),
    (135.0, [5.10, 6.00, 7.12, 8.39, 10.12, 12.04, 14.67, 17.71, 21.90, 26.50]),
    (140.0, [5.25, 6.18, 7.34, 8.66, 10.45, 12.45, 15.18, 18.34, 22.70, 27.50]),
    (145.0, [5.39, 6.36, 7.56, 8.93, 10.77, 12.86, 15.69, 18.97, 23.40, 28.40]),
    (150.0, [5.53, 6.54, 7.78, 9.20, 11.09, 13.27, 16.20, 19.60, 24.20, 29.40]),
    (155.0, [5.67, 6.72, 8.00, 9.47, 11.41, 13.68, 16.71, 20.23, 25.00, 30.40]),
    (160.0, [5.81, 6.90, 8.22, 9.74, 11.73, 14.09, 17.22, 20.86, 25.60, 31.30]),
    (165.0, [5.95, 7.07, 8.44, 10.01, 12.05, 14.50, 17.73, 21.49, 26.40, 32.50]),
    (170.0, [6.09, 7.23, 8.66, 10.28, 12.37, 14.91, 18.24, 22.12, 27.10, 33.60]),
    (175.0, [6.23, 7.39, 8.88, 10.55, 12.69, 15.32, 18.75, 22.75, 27.90, 34.70]),
    (180.0, [6.37, 7.55, 9.10, 10.82, 13.01, 15.73, 19.26, 23.38, 28.50, 35.40]),
    (185.0, [6.50, 7.71, 9.32, 11.09, 13.33, 16.14, 19.77, 24.01, 29.40, 36.60]),
    (190.0, [6.63, 7.87, 9.54, 11.36, 13.65, 16.55, 20.28, 24.64, 30.10, 37.60]),
    (195.0, [6.76, 8.03, 9.75, 11.63, 13.97, 16.96, 20.79, 25.27, 30.90, 38.30]),
    (200.0, [6.89, 8.19, 9.96, 11.90, 14.30, 17.40, 21.30, 25.90, 31.80, 39.50]),
];

/// 표 B.1 격자.
pub const TABLE_B1: Grid<'static, 10> = Grid {
    cols: &B1_P_GRID,
    rows: &B1_ROWS,
};

/// 표 B.2 `(NP, α)` 곡선. NP = 9.7 까지는 조밀하고 그 위는 제어점만 둔다.
#[rustfmt::skip]
pub const TABLE_B2: [(f64, f64); 126] = [
    (0.0, 0.2), (0.015, 0.202), (0.02, 0.215), (0.03, 0.237), (0.04, 0.256),
    (0.05, 0.273), (0.06, 0.289), (0.07, 0.304), (0.08, 0.318), (0.09, 0.331),
    (0.10, 0.343), (0.11, 0.355), (0.12, 0.367), (0.13, 0.378), (0.14, 0.389),
    (0.15, 0.399), (0.16, 0.410), (0.17, 0.420), (0.18, 0.430), (0.19, 0.439),
    (0.20, 0.449), (0.21, 0.458), (0.22, 0.467), (0.23, 0.476), (0.24, 0.485),
    (0.25, 0.493), (0.26, 0.502), (0.27, 0.510), (0.28, 0.518), (0.29, 0.526),
    (0.30, 0.534), (0.35, 0.573), (0.38, 0.595), (0.39, 0.602), (0.40, 0.610),
    (0.41, 0.617), (0.42, 0.624), (0.43, 0.631), (0.44, 0.638), (0.45, 0.645),
    (0.46, 0.652), (0.47, 0.658), (0.48, 0.665), (0.49, 0.672), (0.50, 0.678),
    (0.60, 0.742), (0.70, 0.803), (0.80, 0.860), (0.90, 0.916), (1.00, 0.969),
    (1.10, 1.021), (1.20, 1.071), (1.30, 1.120), (1.40, 1.168), (1.50, 1.215),
    (1.55, 1.238), (1.60, 1.261), (1.70, 1.306), (1.80, 1.350), (1.90, 1.394),
    (2.00, 1.437), (2.10, 1.479), (2.20, 1.521), (2.30, 1.563), (2.40, 1.604),
    (2.50, 1.644), (2.60, 1.684), (2.70, 1.724), (2.80, 1.763), (2.90, 1.802),
    (3.00, 1.840), (3.10, 1.879), (3.20, 1.917), (3.30, 1.954), (3.40, 1.991),
    (3.50, 2.029), (3.60, 2.065), (3.70, 2.102), (3.80, 2.138), (3.90, 2.174),
    (4.00, 2.210), (4.10, 2.246), (4.20, 2.281), (4.30, 2.317), (4.40, 2.352),
    (4.50, 2.386), (4.60, 2.421), (4.70, 2.456), (4.80, 2.490), (4.90, 2.524),
    (5.00, 2.558), (5.50, 2.726), (6.00, 2.891), (6.50, 3.053), (7.00, 3.212),
    (7.50, 3.369), (8.00, 3.524), (8.50, 3.677), (8.60, 3.707), (8.70, 3.738),
    (8.80, 3.768), (8.90, 3.798), (9.00, 3.828), (9.10, 3.858), (9.20, 3.888),
    (9.30, 3.918), (9.40, 3.948), (9.50, 3.978), (9.60, 4.008), (9.70, 4.037),
    (10.0, 4.127), (15.0, 5.547), (20.0, 6.893), (27.0, 8.701), (40.0, 11.92),
    (50.0, 14.32), (80.0, 21.33), (100.0, 25.91), (150.0, 37.21), (200.0, 48.44),
    (300.0, 70.29), (500.0, 113.32), (1000.0, 218.87), (1250.0, 271.14),
    (1600.0, 343.90), (2000.0, 426.80),
];

/// (N, P) 조합에 적용할 표를 고른다.
pub fn select_table(n: f64, p: f64) -> AlphaTable {
    if p > TABLE_B1_P_MIN && n <= TABLE_B1_N_MAX {
        AlphaTable::B1
    } else {
        AlphaTable::B2
    }
}

/// 표 B.1에서 α를 쌍선형 보간한다. N, P는 표 범위로 클램프된다.
pub fn alpha_from_b1(n: f64, p: f64) -> f64 {
    TABLE_B1.bilinear(interp::non_negative(n), interp::non_negative(p))
}

/// 표 B.2에서 α를 NP로 선형 보간한다.
pub fn alpha_from_b2(np: f64) -> f64 {
    interp::linear(&TABLE_B2, interp::non_negative(np)).max(0.0)
}

/// 규범 선택 규칙에 따라 α를 구하고 사용된 표를 함께 돌려준다.
pub fn alpha_lookup(n: f64, p: f64, np: f64) -> AlphaLookup {
    let n = interp::non_negative(n);
    let p = interp::non_negative(p);
    let table = select_table(n, p);
    let alpha = match table {
        AlphaTable::B1 => alpha_from_b1(n, p),
        AlphaTable::B2 => alpha_from_b2(np),
    };
    AlphaLookup { alpha, table }
}

/// 최대 유량 계수 α. 항상 0 이상이다.
pub fn alpha(n: f64, p: f64, np: f64) -> f64 {
    alpha_lookup(n, p, np).alpha
}
