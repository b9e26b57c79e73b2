use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use docrepo_core::{
    document::{Document, HasKey, Uuid},
    eraser::EraserBuilder,
    error::RepositoryError,
    query::{Filter, Predicate},
    repository::Repository,
};
use docrepo_memory::InMemoryEraser;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Ticket {
    id: Uuid,
    region: Option<String>,
    priority: i32,
}

impl Ticket {
    fn new(region: Option<&str>, priority: i32) -> Self {
        Self {
            id: Uuid::new(),
            region: region.map(str::to_string),
            priority,
        }
    }
}

impl Document for Ticket {
    fn collection_name() -> &'static str {
        "tickets"
    }

    fn partition_key(&self) -> Option<&str> {
        self.region.as_deref()
    }
}

impl HasKey<Uuid> for Ticket {
    fn key(&self) -> &Uuid {
        &self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Invoice {
    id: i64,
    total: f64,
}

impl Document for Invoice {
    fn collection_name() -> &'static str {
        "invoices"
    }
}

impl HasKey<i64> for Invoice {
    fn key(&self) -> &i64 {
        &self.id
    }
}

async fn seeded(tickets: &[Ticket]) -> (InMemoryEraser, Repository<InMemoryEraser>) {
    let eraser = InMemoryEraser::builder().build().await.unwrap();
    eraser.insert(tickets.to_vec()).await.unwrap();

    (eraser.clone(), Repository::new(eraser))
}

#[tokio::test]
async fn delete_many_removes_only_the_given_documents() {
    let tickets = (0..5).map(|p| Ticket::new(None, p)).collect::<Vec<_>>();
    let (eraser, repository) = seeded(&tickets).await;

    let deleted = repository.delete_many(tickets[..3].to_vec()).await.unwrap();

    assert_eq!(deleted, 3);
    assert_eq!(eraser.count("tickets").await, 2);
}

#[tokio::test]
async fn delete_many_counts_only_documents_that_existed() {
    let stored = Ticket::new(None, 1);
    let (_, repository) = seeded(std::slice::from_ref(&stored)).await;

    let deleted = repository
        .delete_many(vec![stored, Ticket::new(None, 2)])
        .await
        .unwrap();

    assert_eq!(deleted, 1);
}

#[tokio::test]
async fn delete_many_follows_each_documents_partition() {
    let tickets = vec![
        Ticket::new(Some("eu"), 1),
        Ticket::new(Some("us"), 1),
        Ticket::new(None, 1),
        Ticket::new(Some("eu"), 2),
    ];
    let (eraser, repository) = seeded(&tickets).await;

    let mut collections = eraser.list_collections().await;
    collections.sort();
    assert_eq!(collections, vec!["eu-tickets", "tickets", "us-tickets"]);

    let deleted = repository
        .delete_many(vec![tickets[0].clone(), tickets[1].clone(), tickets[3].clone()])
        .await
        .unwrap();

    assert_eq!(deleted, 3);
    assert_eq!(eraser.count("eu-tickets").await, 0);
    assert_eq!(eraser.count("us-tickets").await, 0);
    assert_eq!(eraser.count("tickets").await, 1);
}

#[tokio::test]
async fn delete_many_of_nothing_is_zero() {
    let (_, repository) = seeded(&[Ticket::new(None, 1)]).await;

    assert_eq!(repository.delete_many(Vec::<Ticket>::new()).await.unwrap(), 0);
}

#[tokio::test]
async fn delete_many_matching_targets_the_requested_partition() {
    let tickets = vec![
        Ticket::new(Some("eu"), 1),
        Ticket::new(Some("eu"), 5),
        Ticket::new(Some("us"), 1),
        Ticket::new(None, 1),
    ];
    let (eraser, repository) = seeded(&tickets).await;
    let low_priority: Predicate<Ticket> = Filter::lt("priority", 3).into();

    let deleted = repository
        .delete_many_matching_in(low_priority.clone(), "eu")
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(eraser.count("eu-tickets").await, 1);
    assert_eq!(eraser.count("us-tickets").await, 1);
    assert_eq!(eraser.count("tickets").await, 1);

    let deleted = repository.delete_many_matching(low_priority).await.unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(eraser.count("tickets").await, 0);
}

#[tokio::test]
async fn delete_many_matching_in_unknown_partition_is_zero() {
    let (_, repository) = seeded(&[Ticket::new(Some("eu"), 1)]).await;

    let deleted = repository
        .delete_many_matching_in(Predicate::<Ticket>::new(Filter::exists("priority")), "apac")
        .await
        .unwrap();

    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn delete_one_matching_removes_a_single_document() {
    let tickets = (0..4).map(|_| Ticket::new(None, 7)).collect::<Vec<_>>();
    let (eraser, repository) = seeded(&tickets).await;

    let deleted = repository
        .delete_one_matching(Predicate::<Ticket>::new(Filter::eq("priority", 7)))
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(eraser.count("tickets").await, 3);
}

#[tokio::test]
async fn delete_one_reports_whether_the_document_existed() {
    let ticket = Ticket::new(None, 1);
    let (_, repository) = seeded(std::slice::from_ref(&ticket)).await;

    assert_eq!(repository.delete_one(ticket.clone()).await.unwrap(), 1);
    assert_eq!(repository.delete_one(ticket).await.unwrap(), 0);
}

#[tokio::test]
async fn cancelled_token_aborts_before_anything_is_removed() {
    let tickets = (0..3).map(|p| Ticket::new(None, p)).collect::<Vec<_>>();
    let (eraser, repository) = seeded(&tickets).await;
    let token = CancellationToken::new();
    token.cancel();

    let by_documents = repository
        .delete_many_cancellable(tickets.clone(), &token)
        .await;
    let by_filter = repository
        .delete_many_matching_cancellable(Predicate::<Ticket>::new(Filter::gte("priority", 0)), &token)
        .await;

    assert!(matches!(by_documents, Err(RepositoryError::Cancelled)));
    assert!(matches!(by_filter, Err(RepositoryError::Cancelled)));
    assert_eq!(eraser.count("tickets").await, 3);
}

#[tokio::test]
async fn live_token_lets_the_delete_through() {
    let tickets = (0..3).map(|p| Ticket::new(None, p)).collect::<Vec<_>>();
    let (_, repository) = seeded(&tickets).await;
    let token = CancellationToken::new();

    let deleted = repository
        .delete_many_cancellable(tickets, token)
        .await
        .unwrap();

    assert_eq!(deleted, 3);
}

#[tokio::test]
async fn explicit_keys_are_matched_by_value() {
    let eraser = InMemoryEraser::new();
    let invoices = (1..=4)
        .map(|id| Invoice { id, total: id as f64 * 10.0 })
        .collect::<Vec<_>>();
    eraser.insert(invoices.clone()).await.unwrap();
    let repository = Repository::new(&eraser);

    let by_key = repository
        .delete_many::<Invoice, i64>(vec![invoices[0].clone()])
        .await
        .unwrap();
    let by_filter = repository
        .delete_many_matching::<Invoice, i64>(Filter::gt("total", 25.0).into())
        .await
        .unwrap();

    assert_eq!(by_key, 1);
    assert_eq!(by_filter, 2);
    assert_eq!(eraser.count("invoices").await, 1);
}

#[tokio::test]
async fn insert_rejects_duplicate_keys_atomically() {
    let existing = Ticket::new(None, 1);
    let (eraser, _) = seeded(std::slice::from_ref(&existing)).await;

    let result = eraser
        .insert(vec![Ticket::new(None, 2), existing])
        .await;

    assert!(matches!(result, Err(RepositoryError::DocumentAlreadyExists(_, collection)) if collection == "tickets"));
    assert_eq!(eraser.count("tickets").await, 1);
}
