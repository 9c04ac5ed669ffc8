use crate::model::category::NOTES;
use crate::model::{
    ConcreteQuestion, CorrectEntries, ExplanationStep, QuestionTemplate, SubCategoryId,
};
use crate::randomizer::{Randomizer, format_amount};

const PROMISSORY: SubCategoryId = SubCategoryId::new("promissory");
const LOAN: SubCategoryId = SubCategoryId::new("loan");

pub(super) fn templates() -> Vec<QuestionTemplate> {
    vec![
        QuestionTemplate::new(
            "301",
            NOTES,
            PROMISSORY,
            "商品 200,000円 を仕入れ、代金は約束手形を振り出して支払った。",
            &["仕入", "支払手形", "受取手形", "買掛金", "現金"],
            "手形の振出は「支払手形」（負債）の増加です。",
            purchase_by_note,
        ),
        QuestionTemplate::new(
            "302",
            NOTES,
            PROMISSORY,
            "商品 350,000円 を売り渡し、代金は同店振り出しの約束手形で受け取った。",
            &["受取手形", "売上", "支払手形", "売掛金", "現金"],
            "手形の受取は「受取手形」（資産）の増加です。",
            sale_for_note,
        ),
        QuestionTemplate::new(
            "303_new",
            NOTES,
            PROMISSORY,
            "買掛金 120,000円 の支払いのため、約束手形を振り出した。",
            &["買掛金", "支払手形", "当座預金", "受取手形", "未払金"],
            "買掛金という債務を消滅させ、手形債務に変更する仕訳です。",
            payable_to_note,
        ),
        QuestionTemplate::new(
            "311",
            NOTES,
            LOAN,
            "銀行から 1,000,000円 を借り入れ、利息を差し引かれた残額が当座預金に振り込まれた（利息 10,000円）。",
            &["当座預金", "支払利息", "借入金", "現金", "手形借入金"],
            "借入額全額を貸方に、利息は「支払利息」、手取額を借方に記入します。",
            borrow_interest_deducted,
        ),
        QuestionTemplate::new(
            "312",
            NOTES,
            LOAN,
            "取引先に現金 100,000円 を貸し付け、借用証書を受け取った。",
            &["貸付金", "現金", "借入金", "受取手形", "手形貸付金"],
            "現金を貸し付けた場合は「貸付金」（資産）です。",
            lend_cash,
        ),
    ]
}

fn purchase_by_note(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(200_000, 0.3, 1_000);
    t.concrete(
        format!(
            "商品 {}円 を仕入れ、代金は約束手形を振り出して支払った。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("仕入", amount)
            .credit("支払手形", amount),
    )
}

fn sale_for_note(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(350_000, 0.3, 1_000);
    t.concrete(
        format!(
            "商品 {}円 を売り渡し、代金は同店振り出しの約束手形で受け取った。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("受取手形", amount)
            .credit("売上", amount),
    )
}

fn payable_to_note(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(120_000, 0.3, 1_000);
    let s = format_amount(amount);
    t.concrete(
        format!("買掛金 {s}円 の支払いのため、約束手形を振り出した。"),
        CorrectEntries::new()
            .debit("買掛金", amount)
            .credit("支払手形", amount),
    )
    .with_steps(vec![
        ExplanationStep::new("買掛金を減少させます。")
            .highlight(format!("買掛金 {s}円"))
            .debit("買掛金", amount),
        ExplanationStep::new("手形債務が発生します。")
            .highlight("約束手形を振り出した")
            .credit("支払手形", amount),
    ])
}

fn borrow_interest_deducted(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let loan = r.amount(1_000_000, 0.2, 10_000);
    let interest = r.part_of(loan, 10_000, 0.2, 100);
    let deposit = loan - interest;
    let (sl, si, sd) = (
        format_amount(loan),
        format_amount(interest),
        format_amount(deposit),
    );
    t.concrete(
        format!(
            "銀行から {sl}円 を借り入れ、利息を差し引かれた残額が当座預金に振り込まれた（利息 {si}円）。"
        ),
        CorrectEntries::new()
            .debit("当座預金", deposit)
            .debit("支払利息", interest)
            .credit("借入金", loan),
    )
    .with_steps(vec![
        ExplanationStep::new("借入金（負債）を計上します。")
            .highlight(format!("銀行から {sl}円"))
            .credit("借入金", loan),
        ExplanationStep::new("利息は費用として処理します。")
            .highlight(format!("利息 {si}円"))
            .debit("支払利息", interest),
        ExplanationStep::new(format!("{sl} - {si} = {sd}円 が手取りです。"))
            .highlight("利息を差し引かれた残額")
            .debit("当座預金", deposit),
    ])
}

fn lend_cash(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(100_000, 0.4, 1_000);
    t.concrete(
        format!(
            "取引先に現金 {}円 を貸し付け、借用証書を受け取った。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("貸付金", amount)
            .credit("現金", amount),
    )
}
