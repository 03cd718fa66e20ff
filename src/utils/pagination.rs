//! 목록 페이지 나누기
//!
//! 페이지 번호가 정수가 아니면 첫 페이지, 정수이지만 1..=마지막 페이지 범위 밖이면
//! 마지막 페이지를 돌려줍니다. 빈 목록은 항목 없는 1/1 페이지입니다.

use std::num::IntErrorKind;

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub num_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub total_count: usize,
}

/// 쿼리 문자열로 요청된 페이지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    NotAnInteger,
    Number(i128),
}

impl PageRequest {
    /// 페이지 번호 해석 (없으면 1페이지)
    ///
    /// i128 범위를 넘는 정수도 정수로 취급합니다.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Number(1);
        };
        match raw.trim().parse::<i128>() {
            Ok(n) => Self::Number(n),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Self::Number(i128::MAX),
                IntErrorKind::NegOverflow => Self::Number(i128::MIN),
                _ => Self::NotAnInteger,
            },
        }
    }

    fn resolve(self, num_pages: usize) -> usize {
        match self {
            Self::NotAnInteger => 1,
            Self::Number(n) if n >= 1 && n <= num_pages as i128 => n as usize,
            Self::Number(_) => num_pages,
        }
    }
}

pub fn paginate<T>(items: Vec<T>, request: PageRequest, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_count = items.len();
    let num_pages = total_count.div_ceil(per_page).max(1);
    let page = request.resolve(num_pages);

    let start = (page - 1) * per_page;
    let items: Vec<T> = items.into_iter().skip(start).take(per_page).collect();

    Page {
        items,
        page,
        num_pages,
        has_next: page < num_pages,
        has_previous: page > 1,
        total_count,
    }
}
