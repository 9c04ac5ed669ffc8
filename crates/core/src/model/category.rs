use crate::model::{MajorCategoryId, SubCategoryId};

/// A drill topic inside a major category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub title: &'static str,
}

/// A top-level group of drill topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorCategory {
    pub id: MajorCategoryId,
    pub title: &'static str,
    pub subs: &'static [SubCategory],
}

pub const CASH_SAVINGS: MajorCategoryId = MajorCategoryId::new("cash_savings");
pub const MERCHANDISE: MajorCategoryId = MajorCategoryId::new("merchandise");
pub const NOTES: MajorCategoryId = MajorCategoryId::new("notes");
pub const ASSETS_EXPENSES: MajorCategoryId = MajorCategoryId::new("assets_expenses");
pub const CLOSING: MajorCategoryId = MajorCategoryId::new("closing");

const fn sub(id: &'static str, title: &'static str) -> SubCategory {
    SubCategory {
        id: SubCategoryId::new(id),
        title,
    }
}

/// Menu structure: major categories and their sub categories, in display order.
pub const GENRES: &[MajorCategory] = &[
    MajorCategory {
        id: CASH_SAVINGS,
        title: "💰 現金・預金",
        subs: &[
            sub("cash", "現金"),
            sub("checking", "当座預金・当座借越"),
            sub("petty_cash", "小口現金"),
            sub("over_short", "現金過不足"),
        ],
    },
    MajorCategory {
        id: MERCHANDISE,
        title: "📦 商品売買",
        subs: &[
            sub("purchase_sales", "仕入・売上 (掛・返品)"),
            sub("credit_gift", "クレジット・商品券"),
            sub("advance", "前受金・前払金"),
            sub("shipping", "諸掛り (発送費など)"),
        ],
    },
    MajorCategory {
        id: NOTES,
        title: "💴 手形・貸借",
        subs: &[sub("promissory", "約束手形"), sub("loan", "貸付金・借入金")],
    },
    MajorCategory {
        id: ASSETS_EXPENSES,
        title: "🏢 固定資産・経費",
        subs: &[
            sub("fixed_assets", "固定資産・未払金"),
            sub("expenses_taxes", "経費・税金"),
        ],
    },
    MajorCategory {
        id: CLOSING,
        title: "📊 決算整理",
        subs: &[
            sub("bad_debts", "貸倒引当金"),
            sub("depreciation", "減価償却"),
            sub("accruals", "見越・繰延・消耗品"),
        ],
    },
];

/// Finds a major category by its string id.
#[must_use]
pub fn find_major(id: &str) -> Option<&'static MajorCategory> {
    GENRES.iter().find(|major| major.id.as_str() == id)
}

/// Finds a sub category (and its parent) by its string id.
#[must_use]
pub fn find_sub(id: &str) -> Option<(&'static MajorCategory, &'static SubCategory)> {
    GENRES.iter().find_map(|major| {
        major
            .subs
            .iter()
            .find(|sub| sub.id.as_str() == id)
            .map(|sub| (major, sub))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_find_categories() {
        assert_eq!(find_major("notes").map(|m| m.title), Some("💴 手形・貸借"));
        let (major, sub) = find_sub("depreciation").unwrap();
        assert_eq!(major.id, CLOSING);
        assert_eq!(sub.title, "減価償却");
        assert!(find_sub("cash_savings").is_none());
        assert!(find_major("unknown").is_none());
    }
}
