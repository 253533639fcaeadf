//! HTML fragments appended into the wallet screens.

use bos_api_types::{AccountAddress, BOS_UNIT, TransactionRecord};

/// Escape text for use inside element content or a quoted attribute.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn phrase_items(words: &[String]) -> String {
    words
        .iter()
        .map(|w| format!("<li><span>{}</span></li>", escape(w)))
        .collect()
}

/// One blank input per passphrase word, tagged with the word's position.
pub fn check_inputs(count: usize) -> String {
    (0..count)
        .map(|i| format!(r#"<li><input type="text" data-index="{i}"></li>"#))
        .collect()
}

pub fn coin(balance: &str) -> String {
    format!("{}<em>{BOS_UNIT}</em>", escape(balance))
}

pub fn account_card(address: &AccountAddress) -> String {
    format!(
        concat!(
            r##"<section class="clfix"><div class="pay"><a href="#">"##,
            r#"<div class="address">{address}</div><p class="coin">{coin}</p></a></div>"#,
            r#"<ul class="ctl clfix">"#,
            r##"<li><a href="#" class="receive"><img src="/images/ico_receive.png"><i class="badge"></i></a></li>"##,
            r##"<li><a href="#" class="send"><img src="/images/ico_send.png"></a></li>"##,
            r##"<li class="freez"><a href="#"><img src="/images/ico_freezing.png"></a></li>"##,
            r#"</ul></section>"#
        ),
        address = escape(address.as_str()),
        coin = coin("0"),
    )
}

/// Unread-count badge, already switched on.
pub fn badge(count: u32) -> String {
    format!(r#"<i class="badge on">{count}</i>"#)
}

pub fn transaction_rows(records: &[TransactionRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}<em></em></td></tr>",
                escape(&r.timestamp),
                escape(&r.amount),
                escape(&r.fee),
                escape(r.account_address.as_str()),
            )
        })
        .collect()
}

pub fn receive_row(amount: &str) -> String {
    format!(
        concat!(
            r#"<tr><td><i><img src="./images/ac_ico_receive_arrow.png"></i>Receiving..</td>"#,
            "<td>{amount}<em>{unit}</em></td><td>Show Detail</td></tr>"
        ),
        amount = escape(amount),
        unit = BOS_UNIT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_escaped() {
        let html = receive_row("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn account_card_carries_address_and_zero_balance() {
        let html = account_card(&AccountAddress("GADDR".to_owned()));
        assert!(html.contains(r#"<div class="address">GADDR</div>"#));
        assert!(html.contains("0<em>BOS</em>"));
        assert!(html.contains(r#"class="badge""#));
    }

    #[test]
    fn badge_shows_count() {
        assert_eq!(badge(3), r#"<i class="badge on">3</i>"#);
    }

    #[test]
    fn check_inputs_never_leak_words() {
        let html = check_inputs(3);
        assert_eq!(html.matches("<input").count(), 3);
        assert!(html.contains(r#"data-index="2""#));
    }
}
