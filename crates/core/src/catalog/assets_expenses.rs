use crate::model::category::ASSETS_EXPENSES;
use crate::model::{
    ConcreteQuestion, CorrectEntries, ExplanationStep, QuestionTemplate, SubCategoryId,
};
use crate::randomizer::{Randomizer, format_amount};

const FIXED_ASSETS: SubCategoryId = SubCategoryId::new("fixed_assets");
const EXPENSES_TAXES: SubCategoryId = SubCategoryId::new("expenses_taxes");

pub(super) fn templates() -> Vec<QuestionTemplate> {
    vec![
        QuestionTemplate::new(
            "401",
            ASSETS_EXPENSES,
            FIXED_ASSETS,
            "営業用のパソコン 150,000円 を購入し、代金は翌月末払いとした。",
            &["備品", "未払金", "買掛金", "消耗品費", "現金"],
            "商品以外の物品購入の未払いは「未払金」です。",
            equipment_on_credit,
        ),
        QuestionTemplate::new(
            "402",
            ASSETS_EXPENSES,
            FIXED_ASSETS,
            "店舗用の土地を 5,000,000円 で購入し、代金は小切手を振り出して支払った。",
            &["土地", "当座預金", "建物", "現金", "未払金"],
            "土地は固定資産です。小切手振出は当座預金の減少です。",
            land_by_check,
        ),
        QuestionTemplate::new(
            "403_new",
            ASSETS_EXPENSES,
            FIXED_ASSETS,
            "営業用のトラックを 1,200,000円 で購入し、代金のうち 200,000円 は現金で支払い、残額は月末払いとした。",
            &["車両運搬具", "現金", "未払金", "買掛金", "備品"],
            "車は「車両運搬具」勘定を使用します。商品ではないので残額は「未払金」です。",
            truck_part_cash,
        ),
        QuestionTemplate::new(
            "411",
            ASSETS_EXPENSES,
            EXPENSES_TAXES,
            "固定資産税 50,000円 を現金で納付した。",
            &["租税公課", "現金", "雑費", "消耗品費", "未払金"],
            "固定資産税や印紙税などは「租税公課」（費用）で処理します。",
            property_tax,
        ),
        QuestionTemplate::new(
            "412",
            ASSETS_EXPENSES,
            EXPENSES_TAXES,
            "従業員の給料 200,000円 を支払い、所得税の源泉徴収分 5,000円 を差し引いた残額を現金で手渡した。",
            &["給料", "預り金", "現金", "立替金", "法定福利費"],
            "給料から天引きした税金などは、会社が一時的に預かるため「預り金」（負債）とします。",
            salary_with_withholding,
        ),
        QuestionTemplate::new(
            "413",
            ASSETS_EXPENSES,
            EXPENSES_TAXES,
            "事業主が個人の生命保険料 20,000円 を店の現金で支払った。",
            &["引出金", "現金", "保険料", "資本金", "雑費"],
            "事業主個人の支出は「引出金」（または資本金の減少）で処理します。経費にはなりません。",
            private_insurance,
        ),
    ]
}

fn equipment_on_credit(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(150_000, 0.3, 1_000);
    t.concrete(
        format!(
            "営業用のパソコン {}円 を購入し、代金は翌月末払いとした。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("備品", amount)
            .credit("未払金", amount),
    )
}

fn land_by_check(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(5_000_000, 0.2, 100_000);
    t.concrete(
        format!(
            "店舗用の土地を {}円 で購入し、代金は小切手を振り出して支払った。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("土地", amount)
            .credit("当座預金", amount),
    )
}

fn truck_part_cash(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let total = r.amount(1_200_000, 0.2, 10_000);
    let cash = r.part_of(total, 200_000, 0.2, 10_000);
    let payable = total - cash;
    let (st, sc, sp) = (
        format_amount(total),
        format_amount(cash),
        format_amount(payable),
    );
    t.concrete(
        format!(
            "営業用のトラックを {st}円 で購入し、代金のうち {sc}円 は現金で支払い、残額は月末払いとした。"
        ),
        CorrectEntries::new()
            .debit("車両運搬具", total)
            .credit("現金", cash)
            .credit("未払金", payable),
    )
    .with_steps(vec![
        ExplanationStep::new("車両運搬具を計上します。")
            .highlight(format!("トラックを {st}円"))
            .debit("車両運搬具", total),
        ExplanationStep::new("頭金を支払いました。")
            .highlight("現金で支払い")
            .credit("現金", cash),
        ExplanationStep::new(format!("{st} - {sc} = {sp}円 が未払金です。"))
            .highlight("残額は月末払い")
            .credit("未払金", payable),
    ])
}

fn property_tax(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(50_000, 0.4, 1_000);
    t.concrete(
        format!("固定資産税 {}円 を現金で納付した。", format_amount(amount)),
        CorrectEntries::new()
            .debit("租税公課", amount)
            .credit("現金", amount),
    )
}

fn salary_with_withholding(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let salary = r.amount(200_000, 0.2, 1_000);
    let tax = r.part_of(salary, 5_000, 0.2, 100);
    let cash = salary - tax;
    let (ss, st, sc) = (
        format_amount(salary),
        format_amount(tax),
        format_amount(cash),
    );
    t.concrete(
        format!(
            "従業員の給料 {ss}円 を支払い、所得税の源泉徴収分 {st}円 を差し引いた残額を現金で手渡した。"
        ),
        CorrectEntries::new()
            .debit("給料", salary)
            .credit("預り金", tax)
            .credit("現金", cash),
    )
    .with_steps(vec![
        ExplanationStep::new("給料の総額を借方に計上します。")
            .highlight(format!("給料 {ss}円"))
            .debit("給料", salary),
        ExplanationStep::new("預り金を貸方に計上します。")
            .highlight(format!("源泉徴収分 {st}円"))
            .credit("預り金", tax),
        ExplanationStep::new(format!("{ss} - {st} = {sc}円 が手取りです。"))
            .highlight("差し引いた残額")
            .credit("現金", cash),
    ])
}

fn private_insurance(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(20_000, 0.3, 1_000);
    t.concrete(
        format!(
            "事業主が個人の生命保険料 {}円 を店の現金で支払った。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("引出金", amount)
            .credit("現金", amount),
    )
}
