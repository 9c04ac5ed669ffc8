use crate::model::category::MERCHANDISE;
use crate::model::{
    ConcreteQuestion, CorrectEntries, ExplanationStep, QuestionTemplate, SubCategoryId,
};
use crate::randomizer::{Randomizer, format_amount};

const PURCHASE_SALES: SubCategoryId = SubCategoryId::new("purchase_sales");
const CREDIT_GIFT: SubCategoryId = SubCategoryId::new("credit_gift");
const ADVANCE: SubCategoryId = SubCategoryId::new("advance");
const SHIPPING: SubCategoryId = SubCategoryId::new("shipping");

pub(super) fn templates() -> Vec<QuestionTemplate> {
    vec![
        QuestionTemplate::new(
            "201",
            MERCHANDISE,
            PURCHASE_SALES,
            "商品 300,000円 を仕入れ、代金は掛けとした。",
            &["仕入", "買掛金", "売掛金", "現金", "商品"],
            "三文法では「仕入」勘定を使用します。",
            purchase_on_account,
        ),
        QuestionTemplate::new(
            "202",
            MERCHANDISE,
            PURCHASE_SALES,
            "商品 450,000円 を売り上げ、代金は掛けとした。",
            &["売掛金", "売上", "仕入", "現金", "商品"],
            "三文法では「売上」勘定を使用します。",
            sale_on_account,
        ),
        QuestionTemplate::new(
            "203",
            MERCHANDISE,
            PURCHASE_SALES,
            "掛けで仕入れた商品 10,000円 を品違いのため返品した。",
            &["買掛金", "仕入", "売掛金", "売上", "現金"],
            "返品（仕入戻し）は、仕入時の逆仕訳を行います。",
            purchase_return,
        ),
        QuestionTemplate::new(
            "204",
            MERCHANDISE,
            PURCHASE_SALES,
            "商品 500,000円 を仕入れ、代金のうち 200,000円 は現金で支払い、残額は掛けとした。",
            &["仕入", "現金", "買掛金", "支払手形", "当座預金"],
            "代金の一部支払いの複合仕訳です。",
            purchase_part_cash,
        ),
        QuestionTemplate::new(
            "205",
            MERCHANDISE,
            PURCHASE_SALES,
            "商品 800,000円 を売り上げ、代金のうち 300,000円 は約束手形を受け取り、残額は掛けとした。",
            &["売上", "受取手形", "売掛金", "現金", "支払手形"],
            "手形と掛けの複合仕訳です。",
            sale_part_note,
        ),
        QuestionTemplate::new(
            "206",
            MERCHANDISE,
            PURCHASE_SALES,
            "掛けで売り上げた商品 50,000円 が品違いのため返品され、同額の売掛金と相殺した。",
            &["売上", "売掛金", "仕入", "買掛金", "現金"],
            "売上戻り（返品）は、売上時の逆仕訳を行います。",
            sales_return,
        ),
        QuestionTemplate::new(
            "211",
            MERCHANDISE,
            CREDIT_GIFT,
            "商品 60,000円 を売り上げ、代金は信販会社発行の商品券で受け取った。",
            &["受取商品券", "売上", "他店商品券", "現金", "売掛金"],
            "信販会社系の商品券は「受取商品券」などで処理します。",
            sale_for_gift_card,
        ),
        QuestionTemplate::new(
            "212",
            MERCHANDISE,
            CREDIT_GIFT,
            "商品 30,000円 を売り上げ、代金はクレジット払い（掛）とされた。",
            &["クレジット売掛金", "売上", "売掛金", "現金", "支払手数料"],
            "クレジット払いは通常の売掛金と区別して「クレジット売掛金」とします。",
            sale_on_credit_card,
        ),
        QuestionTemplate::new(
            "213_new",
            MERCHANDISE,
            CREDIT_GIFT,
            "商品 100,000円 を売り上げ、代金のうち 20,000円 はデパート商品券で受け取り、残額は掛けとした。",
            &["売上", "受取商品券", "売掛金", "他店商品券", "現金"],
            "商品券と掛売りの複合仕訳です。",
            sale_part_gift_card,
        ),
        QuestionTemplate::new(
            "221",
            MERCHANDISE,
            ADVANCE,
            "商品 100,000円 の注文を受け、手付金として現金 20,000円 を受け取った。",
            &["現金", "前受金", "前払金", "売上", "売掛金"],
            "商品の引き渡し前の入金は「前受金」（負債）です。",
            advance_received,
        ),
        QuestionTemplate::new(
            "222",
            MERCHANDISE,
            ADVANCE,
            "商品 50,000円 を注文し、手付金 10,000円 を現金で支払った。",
            &["前払金", "現金", "前受金", "仕入", "買掛金"],
            "商品の受け取り前の支払いは「前払金」（資産）です。",
            advance_paid,
        ),
        QuestionTemplate::new(
            "223",
            MERCHANDISE,
            ADVANCE,
            "注文していた商品 200,000円 を受け取った。代金は内金 50,000円 を差し引き、残額を掛けとした。",
            &["仕入", "前払金", "買掛金", "現金", "前受金"],
            "商品到着時に「前払金」を取り崩し、残額を支払います。",
            advance_applied,
        ),
        QuestionTemplate::new(
            "231",
            MERCHANDISE,
            SHIPPING,
            "商品 100,000円 を仕入れ、代金は掛けとした。なお、引取運賃 2,000円 を現金で支払った。",
            &["仕入", "現金", "発送費", "買掛金", "支払手数料"],
            "【付随費用（仕入）】仕入諸掛りは仕入原価に含めます。",
            purchase_with_freight,
        ),
        QuestionTemplate::new(
            "232",
            MERCHANDISE,
            SHIPPING,
            "商品 200,000円 を売り上げ、代金は掛けとした。なお、発送費 1,500円（当社負担）を現金で支払った。",
            &["売掛金", "発送費", "売上", "現金", "仕入"],
            "【付随費用（売上）】商品代金は「売上」、当社負担の諸掛りは「発送費」（費用）で処理します。",
            sale_with_shipping,
        ),
    ]
}

fn purchase_on_account(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(300_000, 0.3, 1_000);
    let s = format_amount(amount);
    t.concrete(
        format!("商品 {s}円 を仕入れ、代金は掛けとした。"),
        CorrectEntries::new()
            .debit("仕入", amount)
            .credit("買掛金", amount),
    )
    .with_steps(vec![
        ExplanationStep::new("仕入（費用）の発生です。")
            .highlight(format!("商品 {s}円"))
            .debit("仕入", amount),
        ExplanationStep::new("買掛金（負債）の増加です。")
            .highlight("代金は掛けとした")
            .credit("買掛金", amount),
    ])
}

fn sale_on_account(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(450_000, 0.3, 1_000);
    let s = format_amount(amount);
    t.concrete(
        format!("商品 {s}円 を売り上げ、代金は掛けとした。"),
        CorrectEntries::new()
            .debit("売掛金", amount)
            .credit("売上", amount),
    )
    .with_steps(vec![
        ExplanationStep::new("売上（収益）の発生です。")
            .highlight(format!("商品 {s}円"))
            .credit("売上", amount),
        ExplanationStep::new("売掛金（資産）の増加です。")
            .highlight("代金は掛けとした")
            .debit("売掛金", amount),
    ])
}

fn purchase_return(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(10_000, 0.5, 100);
    t.concrete(
        format!(
            "掛けで仕入れた商品 {}円 を品違いのため返品した。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("買掛金", amount)
            .credit("仕入", amount),
    )
}

fn purchase_part_cash(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let total = r.amount(500_000, 0.3, 10_000);
    let cash = r.part_of(total, 200_000, 0.3, 10_000);
    let payable = total - cash;
    let (st, sc, sp) = (
        format_amount(total),
        format_amount(cash),
        format_amount(payable),
    );
    t.concrete(
        format!("商品 {st}円 を仕入れ、代金のうち {sc}円 は現金で支払い、残額は掛けとした。"),
        CorrectEntries::new()
            .debit("仕入", total)
            .credit("現金", cash)
            .credit("買掛金", payable),
    )
    .with_steps(vec![
        ExplanationStep::new("総額を「仕入」とします。")
            .highlight(format!("商品 {st}円"))
            .debit("仕入", total),
        ExplanationStep::new("支払った現金を減らします。")
            .highlight("現金で支払い")
            .credit("現金", cash),
        ExplanationStep::new(format!("{st} - {sc} = {sp}円 が買掛金です。"))
            .highlight("残額は掛けとした")
            .credit("買掛金", payable),
    ])
}

fn sale_part_note(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let total = r.amount(800_000, 0.2, 10_000);
    let note = r.part_of(total, 300_000, 0.2, 10_000);
    let receivable = total - note;
    t.concrete(
        format!(
            "商品 {}円 を売り上げ、代金のうち {}円 は約束手形を受け取り、残額は掛けとした。",
            format_amount(total),
            format_amount(note)
        ),
        CorrectEntries::new()
            .debit("受取手形", note)
            .debit("売掛金", receivable)
            .credit("売上", total),
    )
}

fn sales_return(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(50_000, 0.5, 1_000);
    t.concrete(
        format!(
            "掛けで売り上げた商品 {}円 が品違いのため返品され、同額の売掛金と相殺した。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("売上", amount)
            .credit("売掛金", amount),
    )
}

fn sale_for_gift_card(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(60_000, 0.4, 1_000);
    t.concrete(
        format!(
            "商品 {}円 を売り上げ、代金は信販会社発行の商品券で受け取った。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("受取商品券", amount)
            .credit("売上", amount),
    )
}

fn sale_on_credit_card(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(30_000, 0.4, 1_000);
    t.concrete(
        format!(
            "商品 {}円 を売り上げ、代金はクレジット払い（掛）とされた。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("クレジット売掛金", amount)
            .credit("売上", amount),
    )
}

fn sale_part_gift_card(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let total = r.amount(100_000, 0.3, 1_000);
    let gift = r.part_of(total, 20_000, 0.3, 1_000);
    let receivable = total - gift;
    let (st, sg, sr) = (
        format_amount(total),
        format_amount(gift),
        format_amount(receivable),
    );
    t.concrete(
        format!(
            "商品 {st}円 を売り上げ、代金のうち {sg}円 はデパート商品券で受け取り、残額は掛けとした。"
        ),
        CorrectEntries::new()
            .debit("受取商品券", gift)
            .debit("売掛金", receivable)
            .credit("売上", total),
    )
    .with_steps(vec![
        ExplanationStep::new("売上総額を貸方に計上します。")
            .highlight(format!("商品 {st}円"))
            .credit("売上", total),
        ExplanationStep::new("受け取った商品券は資産として借方へ。")
            .highlight("デパート商品券")
            .debit("受取商品券", gift),
        ExplanationStep::new(format!("{st} - {sg} = {sr}円 を売掛金とします。"))
            .highlight("残額は掛け")
            .debit("売掛金", receivable),
    ])
}

fn advance_received(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let order = r.amount(100_000, 0.2, 1_000);
    let advance = r.part_of(order, 20_000, 0.3, 1_000);
    t.concrete(
        format!(
            "商品 {}円 の注文を受け、手付金として現金 {}円 を受け取った。",
            format_amount(order),
            format_amount(advance)
        ),
        CorrectEntries::new()
            .debit("現金", advance)
            .credit("前受金", advance),
    )
}

fn advance_paid(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let order = r.amount(50_000, 0.3, 1_000);
    let advance = r.part_of(order, 10_000, 0.3, 1_000);
    t.concrete(
        format!(
            "商品 {}円 を注文し、手付金 {}円 を現金で支払った。",
            format_amount(order),
            format_amount(advance)
        ),
        CorrectEntries::new()
            .debit("前払金", advance)
            .credit("現金", advance),
    )
}

fn advance_applied(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let total = r.amount(200_000, 0.2, 1_000);
    let advance = r.part_of(total, 50_000, 0.2, 1_000);
    let payable = total - advance;
    t.concrete(
        format!(
            "注文していた商品 {}円 を受け取った。代金は内金 {}円 を差し引き、残額を掛けとした。",
            format_amount(total),
            format_amount(advance)
        ),
        CorrectEntries::new()
            .debit("仕入", total)
            .credit("前払金", advance)
            .credit("買掛金", payable),
    )
}

fn purchase_with_freight(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let goods = r.amount(100_000, 0.2, 1_000);
    let fee = r.amount(2_000, 0.3, 100);
    let total = goods + fee;
    let (sg, sf, st) = (
        format_amount(goods),
        format_amount(fee),
        format_amount(total),
    );
    t.concrete(
        format!("商品 {sg}円 を仕入れ、代金は掛けとした。なお、引取運賃 {sf}円 を現金で支払った。"),
        CorrectEntries::new()
            .debit("仕入", total)
            .credit("買掛金", goods)
            .credit("現金", fee),
    )
    .with_explanation(format!(
        "【付随費用（仕入）】仕入諸掛りは仕入原価に含めます。\n仕入原価：商品 {sg} ＋ 運賃 {sf} ＝ {st}円"
    ))
    .with_steps(vec![
        ExplanationStep::new("運賃の支払いを記録します。")
            .highlight(format!("引取運賃 {sf}円"))
            .credit("現金", fee),
        ExplanationStep::new("商品代金は買掛金です。")
            .highlight("代金は掛け")
            .credit("買掛金", goods),
        ExplanationStep::new(format!("{sg} + {sf} = {st}円 が仕入原価です。"))
            .highlight(format!("商品 {sg}円 を仕入れ"))
            .debit("仕入", total),
    ])
}

fn sale_with_shipping(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let goods = r.amount(200_000, 0.2, 1_000);
    let fee = r.amount(1_500, 0.3, 100);
    t.concrete(
        format!(
            "商品 {}円 を売り上げ、代金は掛けとした。なお、発送費 {}円（当社負担）を現金で支払った。",
            format_amount(goods),
            format_amount(fee)
        ),
        CorrectEntries::new()
            .debit("売掛金", goods)
            .debit("発送費", fee)
            .credit("売上", goods)
            .credit("現金", fee),
    )
}
