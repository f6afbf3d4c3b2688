//! 中文大写金额

use dify_domain_core::Decimal;
use rust_decimal::RoundingStrategy;
use rust_decimal::prelude::ToPrimitive;

const DIGITS: [char; 10] = ['零', '壹', '贰', '叁', '肆', '伍', '陆', '柒', '捌', '玖'];
const PLACES: [&str; 4] = ["", "拾", "佰", "仟"];

/// 金额转中文大写，如 `1024.50` → `壹仟零贰拾肆元伍角`
///
/// - 先按 half-up 舍入到分
/// - 整数部分按四位分组（万、亿、万亿……），连续的零只读一个“零”
/// - 零角不补“零”：`10.05` → `壹拾元伍分`
/// - 无角分时以“整”结尾；负数前缀“负”
pub fn amount_to_chinese_numerals(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return "零元整".to_string();
    }

    let mut out = String::new();
    if rounded.is_sign_negative() {
        out.push('负');
    }

    let abs = rounded.abs();
    let yuan = abs.trunc();
    let cents = ((abs - yuan) * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);

    let digits: Vec<usize> = yuan
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .map(|d| d as usize)
        .collect();
    push_integer(&mut out, &digits);
    out.push('元');

    if cents == 0 {
        out.push('整');
        return out;
    }
    let (jiao, fen) = ((cents / 10) as usize, (cents % 10) as usize);
    if jiao > 0 {
        out.push(DIGITS[jiao]);
        out.push('角');
    }
    if fen > 0 {
        out.push(DIGITS[fen]);
        out.push('分');
    }
    out
}

fn push_integer(out: &mut String, digits: &[usize]) {
    if digits.iter().all(|d| *d == 0) {
        out.push('零');
        return;
    }

    let groups = digits.len().div_ceil(4);
    let mut started = false;
    let mut need_zero = false;

    for group_index in (0..groups).rev() {
        let end = digits.len() - group_index * 4;
        let group = &digits[end.saturating_sub(4)..end];

        if group.iter().all(|d| *d == 0) {
            need_zero |= started;
            continue;
        }
        // 高位组之后，本组千位为零时需要补“零”
        if started && group[0] == 0 {
            need_zero = true;
        }

        let mut inner_zero = false;
        let mut group_started = false;
        for (i, &digit) in group.iter().enumerate() {
            if digit == 0 {
                inner_zero |= group_started;
                continue;
            }
            if need_zero || inner_zero {
                out.push('零');
                need_zero = false;
                inner_zero = false;
            }
            out.push(DIGITS[digit]);
            out.push_str(PLACES[group.len() - 1 - i]);
            group_started = true;
        }

        out.push_str(&group_unit(group_index));
        started = true;
        need_zero = false;
    }
}

/// 第 n 个四位组的单位：""、万、亿、万亿、亿亿……
fn group_unit(group_index: usize) -> String {
    let mut unit = String::new();
    if group_index % 2 == 1 {
        unit.push('万');
    }
    for _ in 0..group_index / 2 {
        unit.push('亿');
    }
    unit
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn render(amount: Decimal) -> String {
        amount_to_chinese_numerals(amount)
    }

    #[test]
    fn test_examples() {
        assert_eq!(render(dec!(1024.50)), "壹仟零贰拾肆元伍角");
        assert_eq!(render(dec!(100000)), "壹拾万元整");
        assert_eq!(render(dec!(0)), "零元整");
        assert_eq!(render(dec!(298700.00)), "贰拾玖万捌仟柒佰元整");
    }

    #[test]
    fn test_zero_runs_collapse() {
        assert_eq!(render(dec!(10001)), "壹万零壹元整");
        assert_eq!(render(dec!(100100)), "壹拾万零壹佰元整");
        assert_eq!(render(dec!(1001)), "壹仟零壹元整");
        assert_eq!(render(dec!(100000001)), "壹亿零壹元整");
        assert_eq!(render(dec!(100010000)), "壹亿零壹万元整");
        for amount in [dec!(10001), dec!(100000001), dec!(1000000000001)] {
            assert!(!render(amount).contains("零零"));
        }
    }

    #[test]
    fn test_trailing_group_zeros_absorbed_by_unit() {
        assert_eq!(render(dec!(201000)), "贰拾万壹仟元整");
        assert_eq!(render(dec!(1010000)), "壹佰零壹万元整");
    }

    #[test]
    fn test_large_units() {
        assert_eq!(render(dec!(1000000000000)), "壹万亿元整");
        assert_eq!(render(dec!(200000000)), "贰亿元整");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(render(dec!(0.5)), "零元伍角");
        assert_eq!(render(dec!(0.05)), "零元伍分");
        assert_eq!(render(dec!(10.05)), "壹拾元伍分");
        assert_eq!(render(dec!(3.27)), "叁元贰角柒分");
    }

    #[test]
    fn test_rounds_to_cents_first() {
        assert_eq!(render(dec!(1.005)), "壹元壹分");
        assert_eq!(render(dec!(0.004)), "零元整");
    }

    #[test]
    fn test_negative() {
        assert_eq!(render(dec!(-58000)), "负伍万捌仟元整");
    }
}
