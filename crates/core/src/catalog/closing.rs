use crate::model::category::CLOSING;
use crate::model::{
    ConcreteQuestion, CorrectEntries, ExplanationStep, QuestionTemplate, StepAmount,
    SubCategoryId,
};
use crate::randomizer::{Randomizer, format_amount, snap};

const BAD_DEBTS: SubCategoryId = SubCategoryId::new("bad_debts");
const DEPRECIATION: SubCategoryId = SubCategoryId::new("depreciation");
const ACCRUALS: SubCategoryId = SubCategoryId::new("accruals");

const BUILDING_LIFE_YEARS: u64 = 30;
const EQUIPMENT_LIFE_YEARS: u64 = 5;

pub(super) fn templates() -> Vec<QuestionTemplate> {
    vec![
        QuestionTemplate::new(
            "501",
            CLOSING,
            BAD_DEBTS,
            "決算：売掛金残高 500,000円 に対し 2% の貸倒れを見積もる。残高は 4,000円 である（差額補充法）。",
            &["貸倒引当金繰入", "貸倒引当金", "貸倒損失", "売掛金", "現金"],
            "差額補充法では、見積額と引当金残高の差額だけを繰り入れます。",
            allowance_top_up,
        ),
        QuestionTemplate::new(
            "502_new",
            CLOSING,
            BAD_DEBTS,
            "決算：受取手形残高 200,000円 と売掛金残高 300,000円 の合計に対し 3% の貸倒れを見積もる。なお、貸倒引当金の残高はない。",
            &["貸倒引当金繰入", "貸倒引当金", "売掛金", "受取手形", "現金"],
            "売上債権の合計に対して計算します。残高がないため全額を繰り入れます。",
            allowance_from_zero,
        ),
        QuestionTemplate::new(
            "511",
            CLOSING,
            DEPRECIATION,
            "建物（取得原価 3,000,000円）の減価償却を行う。耐用年数30年、残存価額ゼロ、定額法、直接法。",
            &["減価償却費", "建物", "減価償却累計額", "備品", "損益"],
            "定額法では取得原価を耐用年数で割った額を毎期の費用とします。",
            building_depreciation,
        ),
        QuestionTemplate::new(
            "512_new",
            CLOSING,
            DEPRECIATION,
            "備品（取得原価 600,000円）の減価償却を行う。耐用年数5年、残存価額ゼロ、定額法、直接法。",
            &["減価償却費", "備品", "減価償却累計額", "建物", "損益"],
            "定額法では取得原価を耐用年数で割った額を毎期の費用とします。",
            equipment_depreciation,
        ),
        QuestionTemplate::new(
            "521",
            CLOSING,
            ACCRUALS,
            "消耗品の期末棚卸高は 2,000円 であった（購入時に全額費用処理している）。",
            &["消耗品", "消耗品費", "備品", "現金", "未払金"],
            "未使用分を資産（消耗品）に計上し、費用を取り消します。",
            supplies_on_hand,
        ),
        QuestionTemplate::new(
            "522",
            CLOSING,
            ACCRUALS,
            "家賃の未払分 50,000円 を計上する。",
            &["支払家賃", "未払家賃", "前払家賃", "現金", "未払金"],
            "当期の費用だが未払いのものは、費用を計上し、「未払〇〇」（負債）とします。",
            accrued_rent,
        ),
        QuestionTemplate::new(
            "523_new",
            CLOSING,
            ACCRUALS,
            "今月分の水道光熱費 15,000円 が未払いであり、これを計上する。",
            &["水道光熱費", "未払金", "未払費用", "現金", "当座預金"],
            "継続的なサービス契約に基づく未払費用ですが、3級では「未払金」または「未払費用」として処理されることがあります。ここでは一般的な未払金として扱います。",
            accrued_utilities,
        ),
    ]
}

fn allowance_top_up(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let receivables = r.amount(500_000, 0.2, 10_000);
    let target = receivables * 2 / 100;
    let current = target * 4 / 10;
    let provision = target - current;
    let (sr, st, sc, sp) = (
        format_amount(receivables),
        format_amount(target),
        format_amount(current),
        format_amount(provision),
    );
    t.concrete(
        format!(
            "決算：売掛金残高 {sr}円 に対し 2% の貸倒れを見積もる。残高は {sc}円 である（差額補充法）。"
        ),
        CorrectEntries::new()
            .debit("貸倒引当金繰入", provision)
            .credit("貸倒引当金", provision),
    )
    .with_explanation(format!(
        "目標額 {st} - 残高 {sc} = {sp}円 を繰り入れます。"
    ))
    .with_steps(vec![
        ExplanationStep::new("まずは目標額を計算しましょう。")
            .highlight("2% の貸倒れを見積もる")
            .credit("貸倒引当金", StepAmount::Pending),
        ExplanationStep::new(format!("{sr} × 0.02 = {st}円 が目標です。"))
            .highlight(format!("売掛金残高 {sr}円")),
        ExplanationStep::new(format!(
            "足りない分（{st} - {sc} = {sp}円）を補充します。"
        ))
        .highlight(format!("残高は {sc}円"))
        .credit("貸倒引当金", provision),
        ExplanationStep::new("補充額を費用として計上します。")
            .highlight("差額補充法")
            .debit("貸倒引当金繰入", provision),
    ])
}

fn allowance_from_zero(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let notes = r.amount(200_000, 0.2, 10_000);
    let receivables = r.amount(300_000, 0.2, 10_000);
    let total = notes + receivables;
    let provision = total * 3 / 100;
    let (sn, sr, st, sp) = (
        format_amount(notes),
        format_amount(receivables),
        format_amount(total),
        format_amount(provision),
    );
    t.concrete(
        format!(
            "決算：受取手形残高 {sn}円 と売掛金残高 {sr}円 の合計に対し 3% の貸倒れを見積もる。なお、貸倒引当金の残高はない。"
        ),
        CorrectEntries::new()
            .debit("貸倒引当金繰入", provision)
            .credit("貸倒引当金", provision),
    )
    .with_steps(vec![
        ExplanationStep::new(format!("対象は {sn} + {sr} = {st}円です。")).highlight("合計"),
        ExplanationStep::new(format!("{st} × 0.03 = {sp}円 が見積額です。"))
            .highlight("3% の貸倒れ")
            .debit("貸倒引当金繰入", provision),
        ExplanationStep::new("全額を新たに設定します。")
            .highlight("残高はない")
            .credit("貸倒引当金", provision),
    ])
}

fn building_depreciation(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let cost = snap(r.amount(3_000_000, 0.2, 10_000), 1_000 * BUILDING_LIFE_YEARS);
    let expense = cost / BUILDING_LIFE_YEARS;
    let (sc, se) = (format_amount(cost), format_amount(expense));
    t.concrete(
        format!(
            "建物（取得原価 {sc}円）の減価償却を行う。耐用年数30年、残存価額ゼロ、定額法、直接法。"
        ),
        CorrectEntries::new()
            .debit("減価償却費", expense)
            .credit("建物", expense),
    )
    .with_explanation(format!(
        "{sc} ÷ 30 = {se}。直接法なので貸方は資産科目（建物）を減らします。"
    ))
    .with_steps(vec![
        ExplanationStep::new("費用の計上です。")
            .highlight("減価償却を行う")
            .debit("減価償却費", StepAmount::Pending),
        ExplanationStep::new(format!("{sc} ÷ 30 = {se}円"))
            .highlight(format!("取得原価 {sc}円"))
            .debit("減価償却費", expense),
        ExplanationStep::new("建物を直接減らします。")
            .highlight("直接法")
            .credit("建物", expense),
    ])
}

fn equipment_depreciation(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let cost = snap(r.amount(600_000, 0.2, 10_000), 1_000 * EQUIPMENT_LIFE_YEARS);
    let expense = cost / EQUIPMENT_LIFE_YEARS;
    let (sc, se) = (format_amount(cost), format_amount(expense));
    t.concrete(
        format!(
            "備品（取得原価 {sc}円）の減価償却を行う。耐用年数5年、残存価額ゼロ、定額法、直接法。"
        ),
        CorrectEntries::new()
            .debit("減価償却費", expense)
            .credit("備品", expense),
    )
    .with_explanation(format!("{sc} ÷ 5 = {se}。備品の価値を直接減らします。"))
    .with_steps(vec![
        ExplanationStep::new("備品の価値が減少します。")
            .highlight(format!("備品（取得原価 {sc}円）"))
            .debit("減価償却費", StepAmount::Pending),
        ExplanationStep::new(format!("{sc} ÷ 5 = {se}円"))
            .highlight("耐用年数5年")
            .debit("減価償却費", expense),
        ExplanationStep::new("貸方で備品を減額します。")
            .highlight("直接法")
            .credit("備品", expense),
    ])
}

fn supplies_on_hand(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(2_000, 0.5, 100);
    let s = format_amount(amount);
    t.concrete(
        format!("消耗品の期末棚卸高は {s}円 であった（購入時に全額費用処理している）。"),
        CorrectEntries::new()
            .debit("消耗品", amount)
            .credit("消耗品費", amount),
    )
    .with_steps(vec![
        ExplanationStep::new("まだ使っていない分があります。")
            .highlight("購入時に全額費用処理している"),
        ExplanationStep::new("残りを資産計上します。")
            .highlight(format!("期末棚卸高は {s}円"))
            .debit("消耗品", amount),
        ExplanationStep::new("費用を取り消します。")
            .highlight(format!("期末棚卸高は {s}円"))
            .credit("消耗品費", amount),
    ])
}

fn accrued_rent(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(50_000, 0.3, 1_000);
    t.concrete(
        format!("家賃の未払分 {}円 を計上する。", format_amount(amount)),
        CorrectEntries::new()
            .debit("支払家賃", amount)
            .credit("未払家賃", amount),
    )
}

fn accrued_utilities(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(15_000, 0.4, 1_000);
    let s = format_amount(amount);
    t.concrete(
        format!("今月分の水道光熱費 {s}円 が未払いであり、これを計上する。"),
        CorrectEntries::new()
            .debit("水道光熱費", amount)
            .credit("未払金", amount),
    )
    .with_steps(vec![
        ExplanationStep::new("費用を計上します。")
            .highlight(format!("水道光熱費 {s}円"))
            .debit("水道光熱費", amount),
        ExplanationStep::new("まだ払っていないので未払金です。")
            .highlight("未払いであり")
            .credit("未払金", amount),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depreciation_divides_evenly_across_the_range() {
        for seed in 0..200 {
            let mut r = Randomizer::seeded(seed);
            let building = building_depreciation(&templates()[2], &mut r);
            let equipment = equipment_depreciation(&templates()[3], &mut r);
            for q in [building, equipment] {
                let expense = q.correct_entries.debit[0].amount;
                assert!(expense > 0);
                assert_eq!(expense % 1_000, 0, "{}", q.text);
            }
        }
    }

    #[test]
    fn allowance_top_up_at_midpoint() {
        let q = allowance_top_up(&templates()[0], &mut Randomizer::fixed(0.5));
        assert_eq!(
            q.correct_entries,
            CorrectEntries::new()
                .debit("貸倒引当金繰入", 6_000)
                .credit("貸倒引当金", 6_000)
        );
        assert_eq!(q.explanation, "目標額 10,000 - 残高 4,000 = 6,000円 を繰り入れます。");
    }
}
