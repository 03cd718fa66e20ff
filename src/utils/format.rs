//! 화면 표시용 포맷 함수

use chrono::NaiveDateTime;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const FILLED_STAR: char = '★';
const EMPTY_STAR: char = '☆';
const MAX_STARS: i32 = 5;

/// RFC 5987 `attr-char` 외의 문자는 모두 인코딩
const ATTR_CHAR_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// 별점을 `★★★☆☆` 형태로 표시합니다.
///
/// 채운 별 `value`개 뒤에 빈 별 `5 - value`개를 붙이며, 음수 개수는 0개로 봅니다.
pub fn stars_glyph(value: i32) -> String {
    let filled = value.max(0) as usize;
    let empty = MAX_STARS.saturating_sub(value).max(0) as usize;

    std::iter::repeat(FILLED_STAR)
        .take(filled)
        .chain(std::iter::repeat(EMPTY_STAR).take(empty))
        .collect()
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// 다운로드 파일명에 쓸 수 있도록 정리합니다.
///
/// 헤더에 안전한 ASCII 영숫자와 `-`, `_`, `.`만 남기고 나머지는 `_`로 바꿉니다.
pub fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "survey".to_string()
    } else {
        sanitized
    }
}

/// `filename*=UTF-8''...` 파라미터 값으로 인코딩합니다.
pub fn encode_ext_value(value: &str) -> String {
    utf8_percent_encode(value, ATTR_CHAR_ENCODE_SET).to_string()
}
