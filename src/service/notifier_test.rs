//! Tests for ChangeNotifier pub/sub system.

use super::notifier::{ChangeNotifier, QuoteChange};
use crate::db::Quote;

fn sample_quote(id: i64) -> Quote {
    Quote {
        id,
        text: "Carpe diem".to_string(),
        author: "Horace".to_string(),
        is_favorite: false,
    }
}

#[tokio::test]
async fn test_multiple_subscribers_receive_same_message() {
    let notifier = ChangeNotifier::new();
    let mut sub1 = notifier.subscribe();
    let mut sub2 = notifier.subscribe();

    let msg = QuoteChange::Inserted {
        quote: sample_quote(1),
    };

    notifier.notify(msg.clone());

    assert_eq!(sub1.next().await, Some(msg.clone()));
    assert_eq!(sub2.next().await, Some(msg));
}

#[tokio::test]
async fn test_notify_with_no_subscribers_does_not_panic() {
    let notifier = ChangeNotifier::new();

    notifier.notify(QuoteChange::Deleted { id: 3 });
    assert_eq!(notifier.subscriber_count(), 0);
}

#[tokio::test]
async fn test_subscriber_count_tracks_open_subscriptions() {
    let notifier = ChangeNotifier::new();
    let sub1 = notifier.subscribe();
    let sub2 = notifier.subscribe();
    assert_eq!(notifier.subscriber_count(), 2);

    sub1.close();
    assert_eq!(notifier.subscriber_count(), 1);

    drop(sub2);
    assert_eq!(notifier.subscriber_count(), 0);
}

#[test]
fn test_change_serialization_format() {
    let inserted = serde_json::to_value(QuoteChange::Inserted {
        quote: sample_quote(1),
    })
    .unwrap();
    assert_eq!(inserted["type"], "inserted");
    assert_eq!(inserted["data"]["quote"]["author"], "Horace");

    let updated = serde_json::to_value(QuoteChange::Updated {
        quote: sample_quote(2),
    })
    .unwrap();
    assert_eq!(updated["type"], "updated");
    assert_eq!(updated["data"]["quote"]["id"], 2);

    let deleted = serde_json::to_value(QuoteChange::Deleted { id: 3 }).unwrap();
    assert_eq!(
        deleted,
        serde_json::json!({"type": "deleted", "data": {"id": 3}})
    );
}

#[test]
fn test_quote_id_for_every_variant() {
    assert_eq!(
        QuoteChange::Inserted {
            quote: sample_quote(1)
        }
        .quote_id(),
        1
    );
    assert_eq!(
        QuoteChange::Updated {
            quote: sample_quote(2)
        }
        .quote_id(),
        2
    );
    assert_eq!(QuoteChange::Deleted { id: 3 }.quote_id(), 3);
}
