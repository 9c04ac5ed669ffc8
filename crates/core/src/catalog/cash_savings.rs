use crate::model::category::CASH_SAVINGS;
use crate::model::{
    ConcreteQuestion, CorrectEntries, ExplanationStep, QuestionTemplate, SubCategoryId,
};
use crate::randomizer::{Randomizer, format_amount};

const CASH: SubCategoryId = SubCategoryId::new("cash");
const CHECKING: SubCategoryId = SubCategoryId::new("checking");
const PETTY_CASH: SubCategoryId = SubCategoryId::new("petty_cash");
const OVER_SHORT: SubCategoryId = SubCategoryId::new("over_short");

pub(super) fn templates() -> Vec<QuestionTemplate> {
    vec![
        QuestionTemplate::new(
            "101",
            CASH_SAVINGS,
            CASH,
            "現金 2,500,000円 を元入れして営業を開始した。",
            &["現金", "資本金", "借入金", "当座預金", "備品"],
            "【開業】元手は「資本金」として処理します。",
            capital_contribution,
        ),
        QuestionTemplate::new(
            "102",
            CASH_SAVINGS,
            CASH,
            "店主が私用で現金 30,000円 を引き出した。",
            &["引出金", "現金", "資本金", "給料", "雑費"],
            "【引出金】店主の私用は資本金の減少または「引出金」勘定で処理します。",
            owner_withdrawal,
        ),
        QuestionTemplate::new(
            "103",
            CASH_SAVINGS,
            CASH,
            "郵便局で切手 1,000円 を現金で購入した。",
            &["通信費", "現金", "消耗品費", "租税公課", "雑費"],
            "切手は「通信費」で処理します。",
            postage_stamps,
        ),
        QuestionTemplate::new(
            "104_new",
            CASH_SAVINGS,
            CASH,
            "現金 5,000,000円 を元入れして開業し、直ちに当座預金に 1,000,000円 を預け入れた。",
            &["現金", "当座預金", "資本金", "借入金", "普通預金"],
            "元入れ総額は資本金ですが、現金の一部はすぐに当座預金になっています。",
            capital_with_deposit,
        ),
        QuestionTemplate::new(
            "111",
            CASH_SAVINGS,
            CHECKING,
            "銀行と当座取引契約を結び、現金 1,000,000円 を預け入れた。",
            &["当座預金", "現金", "普通預金", "借入金", "資本金"],
            "当座預金口座への預け入れの仕訳です。",
            open_checking_account,
        ),
        QuestionTemplate::new(
            "112",
            CASH_SAVINGS,
            CHECKING,
            "買掛金 150,000円 を支払うため、小切手を振り出した。",
            &["買掛金", "当座預金", "現金", "支払手形", "未払金"],
            "小切手の振出は「当座預金」の減少です。",
            pay_payable_by_check,
        ),
        QuestionTemplate::new(
            "113",
            CASH_SAVINGS,
            CHECKING,
            "買掛金 200,000円 の支払いに対し、当座預金残高が 150,000円 しかなかったが、借越契約があるため小切手を振り出した。（一勘定法）",
            &["当座", "当座預金", "当座借越", "買掛金", "現金"],
            "【一勘定法】当座預金と当座借越をまとめて「当座」勘定で処理します。",
            overdraft_single_account,
        ),
        QuestionTemplate::new(
            "121",
            CASH_SAVINGS,
            PETTY_CASH,
            "小口現金係に、小切手 50,000円 を振り出して手渡した。",
            &["小口現金", "当座預金", "現金", "雑費", "通信費"],
            "定額資金前渡法（インプレスト・システム）による資金の補給です。",
            petty_cash_float,
        ),
        QuestionTemplate::new(
            "122",
            CASH_SAVINGS,
            PETTY_CASH,
            "小口現金係から、通信費 5,000円 と 消耗品費 3,000円 の支払報告を受けた。",
            &["通信費", "消耗品費", "小口現金", "雑費", "未払金"],
            "報告を受けた時点で、費用の計上と小口現金の減少を記録します。",
            petty_cash_report,
        ),
        QuestionTemplate::new(
            "131",
            CASH_SAVINGS,
            OVER_SHORT,
            "現金の実際有高を調べたところ 58,000円 であり、帳簿残高 60,000円 と一致しなかった。",
            &["現金過不足", "現金", "雑損", "雑益", "引出金"],
            "実際有高が少ないため、帳簿の現金を減らして一致させます。相手科目は「現金過不足」です。",
            cash_shortage,
        ),
        QuestionTemplate::new(
            "132",
            CASH_SAVINGS,
            OVER_SHORT,
            "現金過不足 1,000円（貸方残高）の原因が、受取利息の記入漏れと判明した。",
            &["現金過不足", "受取利息", "現金", "雑益", "雑損"],
            "貸方残高（現金過剰）の原因が判明したので、現金過不足を取り消して正しい科目に振り替えます。",
            overage_resolved,
        ),
        QuestionTemplate::new(
            "133_new",
            CASH_SAVINGS,
            OVER_SHORT,
            "現金の実際有高を調べたところ 85,000円 で、帳簿残高 80,000円 より多かった。",
            &["現金", "現金過不足", "雑益", "受取利息", "売掛金"],
            "実際が多い場合は、帳簿の現金を増やして合わせます。",
            cash_overage,
        ),
    ]
}

fn capital_contribution(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(2_500_000, 0.4, 10_000);
    let s = format_amount(amount);
    t.concrete(
        format!("現金 {s}円 を元入れして営業を開始した。"),
        CorrectEntries::new()
            .debit("現金", amount)
            .credit("資本金", amount),
    )
    .with_steps(vec![
        ExplanationStep::new("お店に「現金」という資産が増えました。")
            .highlight(format!("現金 {s}円"))
            .debit("現金", amount),
        ExplanationStep::new(
            "この現金は元手として出資されたものです。「資本金」（純資産）の増加として処理します。",
        )
        .highlight("元入れして営業を開始")
        .credit("資本金", amount),
    ])
}

fn owner_withdrawal(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(30_000, 0.5, 1_000);
    let s = format_amount(amount);
    t.concrete(
        format!("店主が私用で現金 {s}円 を引き出した。"),
        CorrectEntries::new()
            .debit("引出金", amount)
            .credit("現金", amount),
    )
    .with_steps(vec![
        ExplanationStep::new("お店の「現金」が減りました。")
            .highlight(format!("現金 {s}円 を引き出した"))
            .credit("現金", amount),
        ExplanationStep::new("店主個人のための支出は「引出金」です。")
            .highlight("店主が私用で")
            .debit("引出金", amount),
    ])
}

fn postage_stamps(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(1_000, 0.5, 100);
    let s = format_amount(amount);
    t.concrete(
        format!("郵便局で切手 {s}円 を現金で購入した。"),
        CorrectEntries::new()
            .debit("通信費", amount)
            .credit("現金", amount),
    )
    .with_steps(vec![
        ExplanationStep::new("現金を支払ったので貸方へ。")
            .highlight("現金で購入した")
            .credit("現金", amount),
        ExplanationStep::new("切手代は「通信費」です。")
            .highlight(format!("切手 {s}円"))
            .debit("通信費", amount),
    ])
}

fn capital_with_deposit(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let total = r.amount(5_000_000, 0.2, 100_000);
    let deposit = r.part_of(total, 1_000_000, 0.2, 10_000);
    let cash = total - deposit;
    let (st, sd, sc) = (
        format_amount(total),
        format_amount(deposit),
        format_amount(cash),
    );
    t.concrete(
        format!("現金 {st}円 を元入れして開業し、直ちに当座預金に {sd}円 を預け入れた。"),
        CorrectEntries::new()
            .debit("現金", cash)
            .debit("当座預金", deposit)
            .credit("資本金", total),
    )
    .with_steps(vec![
        ExplanationStep::new(format!("元入総額は{st}円です。これを資本金とします。"))
            .highlight(format!("現金 {st}円 を元入れ"))
            .credit("資本金", total),
        ExplanationStep::new(format!("そのうち{sd}円は当座預金に入金されました。"))
            .highlight(format!("当座預金に {sd}円"))
            .debit("当座預金", deposit),
        ExplanationStep::new(format!(
            "残りが手元の現金になります。{st} - {sd} = {sc}円です。"
        ))
        .highlight("元入れして開業し")
        .debit("現金", cash),
    ])
}

fn open_checking_account(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(1_000_000, 0.3, 10_000);
    let s = format_amount(amount);
    t.concrete(
        format!("銀行と当座取引契約を結び、現金 {s}円 を預け入れた。"),
        CorrectEntries::new()
            .debit("当座預金", amount)
            .credit("現金", amount),
    )
    .with_steps(vec![
        ExplanationStep::new("手元の現金を預けたので、現金が減ります。")
            .highlight(format!("現金 {s}円 を預け入れた"))
            .credit("現金", amount),
        ExplanationStep::new("当座預金口座の残高が増えます。")
            .highlight("当座取引契約を結び")
            .debit("当座預金", amount),
    ])
}

fn pay_payable_by_check(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(150_000, 0.3, 1_000);
    let s = format_amount(amount);
    t.concrete(
        format!("買掛金 {s}円 を支払うため、小切手を振り出した。"),
        CorrectEntries::new()
            .debit("買掛金", amount)
            .credit("当座預金", amount),
    )
    .with_steps(vec![
        ExplanationStep::new("買掛金を支払うので、負債の減少です。")
            .highlight(format!("買掛金 {s}円"))
            .debit("買掛金", amount),
        ExplanationStep::new("小切手の振出は当座預金の減少です。")
            .highlight("小切手を振り出した")
            .credit("当座預金", amount),
    ])
}

fn overdraft_single_account(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let payment = r.amount(200_000, 0.2, 10_000);
    let shortfall = r.part_of(payment, 50_000, 0.1, 1_000);
    let balance = payment - shortfall;
    let (sp, sb) = (format_amount(payment), format_amount(balance));
    t.concrete(
        format!(
            "買掛金 {sp}円 の支払いに対し、当座預金残高が {sb}円 しかなかったが、借越契約があるため小切手を振り出した。（一勘定法）"
        ),
        CorrectEntries::new()
            .debit("買掛金", payment)
            .credit("当座", payment),
    )
    .with_steps(vec![
        ExplanationStep::new("買掛金を支払います。")
            .highlight(format!("買掛金 {sp}円"))
            .debit("買掛金", payment),
        ExplanationStep::new("一勘定法なので、預金残高に関わらず「当座」で処理します。")
            .highlight("借越契約があるため小切手を振り出した")
            .credit("当座", payment),
    ])
}

fn petty_cash_float(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(50_000, 0.2, 1_000);
    t.concrete(
        format!(
            "小口現金係に、小切手 {}円 を振り出して手渡した。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("小口現金", amount)
            .credit("当座預金", amount),
    )
}

fn petty_cash_report(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let postage = r.amount(5_000, 0.4, 100);
    let supplies = r.amount(3_000, 0.4, 100);
    let total = postage + supplies;
    let (sp, ss, st) = (
        format_amount(postage),
        format_amount(supplies),
        format_amount(total),
    );
    t.concrete(
        format!("小口現金係から、通信費 {sp}円 と 消耗品費 {ss}円 の支払報告を受けた。"),
        CorrectEntries::new()
            .debit("通信費", postage)
            .debit("消耗品費", supplies)
            .credit("小口現金", total),
    )
    .with_steps(vec![
        ExplanationStep::new("通信費を計上します。")
            .highlight(format!("通信費 {sp}円"))
            .debit("通信費", postage),
        ExplanationStep::new("消耗品費を計上します。")
            .highlight(format!("消耗品費 {ss}円"))
            .debit("消耗品費", supplies),
        ExplanationStep::new(format!("{sp} + {ss} = {st}円 が減少額です。"))
            .highlight("支払報告を受けた")
            .credit("小口現金", total),
    ])
}

fn cash_shortage(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let book = r.amount(60_000, 0.2, 1_000);
    let diff = r.part_of(book, 2_000, 0.5, 100);
    let actual = book - diff;
    let (sb, sd, sa) = (
        format_amount(book),
        format_amount(diff),
        format_amount(actual),
    );
    t.concrete(
        format!("現金の実際有高を調べたところ {sa}円 であり、帳簿残高 {sb}円 と一致しなかった。"),
        CorrectEntries::new()
            .debit("現金過不足", diff)
            .credit("現金", diff),
    )
    .with_steps(vec![
        ExplanationStep::new(format!(
            "実際({sa}) < 帳簿({sb}) なので、帳簿を{sd}円減らします。"
        ))
        .highlight(format!("実際有高を調べたところ {sa}円"))
        .credit("現金", diff),
        ExplanationStep::new("差額は「現金過不足」で処理します。")
            .highlight("一致しなかった")
            .debit("現金過不足", diff),
    ])
}

fn overage_resolved(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let amount = r.amount(1_000, 0.5, 100);
    t.concrete(
        format!(
            "現金過不足 {}円（貸方残高）の原因が、受取利息の記入漏れと判明した。",
            format_amount(amount)
        ),
        CorrectEntries::new()
            .debit("現金過不足", amount)
            .credit("受取利息", amount),
    )
}

fn cash_overage(t: &QuestionTemplate, r: &mut Randomizer) -> ConcreteQuestion {
    let book = r.amount(80_000, 0.2, 1_000);
    let diff = r.amount(5_000, 0.5, 100);
    let actual = book + diff;
    let (sb, sd, sa) = (
        format_amount(book),
        format_amount(diff),
        format_amount(actual),
    );
    t.concrete(
        format!("現金の実際有高を調べたところ {sa}円 で、帳簿残高 {sb}円 より多かった。"),
        CorrectEntries::new()
            .debit("現金", diff)
            .credit("現金過不足", diff),
    )
    .with_steps(vec![
        ExplanationStep::new(format!(
            "実際({sa}) > 帳簿({sb}) なので、帳簿を{sd}円増やします。"
        ))
        .highlight(format!("実際有高を調べたところ {sa}円"))
        .debit("現金", diff),
        ExplanationStep::new("増加分は「現金過不足」です。")
            .highlight("より多かった")
            .credit("現金過不足", diff),
    ])
}
