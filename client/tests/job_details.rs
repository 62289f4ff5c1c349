mod common;

use bidding::{validate_bid, BidRejection, BidStatus, Job};
use chrono::{DateTime, Duration, Utc};
use common::{job, now, Call, FakeApi, BIDDER, BUYER};
use market_api::types::InsertResponse;
use market_client::{
    pages::{
        job_details::{FETCH_ERROR, SUBMIT_ERROR},
        JobDetails, Route, SubmitOutcome,
    },
    session::Session,
};
use proptest::prelude::*;

async fn loaded<'a>(api: &'a FakeApi, session: Session) -> JobDetails<&'a FakeApi> {
    let mut page = JobDetails::new(api, session, job().id, now());
    page.load().await;
    page
}

fn fill(page: &mut JobDetails<&FakeApi>, price: &str, deadline: DateTime<Utc>) {
    page.form.price = price.to_string();
    page.form.comment = "I can start right away".to_string();
    page.form.deadline = deadline;
}

fn posted(api: &FakeApi) -> Vec<Call> {
    api.calls()
        .into_iter()
        .filter(|c| matches!(c, Call::AddBid(_)))
        .collect()
}

#[tokio::test]
async fn load_failure_leaves_error_text() {
    let api = FakeApi::default();
    let page = loaded(&api, Session::signed_in(BIDDER)).await;
    assert_eq!(page.error(), Some(FETCH_ERROR));
    assert!(page.job().is_none());
    assert_eq!(api.calls(), vec![Call::GetJob(job().id)]);
}

#[tokio::test]
async fn submit_before_load_is_not_ready() {
    let api = FakeApi::with_job(job());
    let mut page = JobDetails::new(&api, Session::signed_in(BIDDER), job().id, now());
    page.form.price = "200".into();
    assert_eq!(page.submit(now()).await, SubmitOutcome::NotReady);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn anonymous_bidder_must_sign_in() {
    let api = FakeApi::with_job(job());
    let mut page = loaded(&api, Session::anonymous()).await;
    fill(&mut page, "200", now());
    assert_eq!(page.submit(now()).await, SubmitOutcome::SignInRequired);
    assert!(posted(&api).is_empty());
}

#[tokio::test]
async fn buyer_cannot_bid_on_own_job() {
    let api = FakeApi::with_job(job());
    let mut page = loaded(&api, Session::signed_in(BUYER)).await;
    fill(&mut page, "200", now());
    let outcome = page.submit(now()).await;
    assert_eq!(outcome, SubmitOutcome::Rejected(BidRejection::SelfBid));
    assert_eq!(outcome.to_string(), "Action not permitted!");
    assert!(posted(&api).is_empty());
}

#[tokio::test]
async fn bidding_after_job_deadline_is_refused() {
    let api = FakeApi::with_job(job());
    let mut page = loaded(&api, Session::signed_in(BIDDER)).await;
    let late = job().deadline + Duration::days(1);
    fill(&mut page, "200", job().deadline);
    assert_eq!(
        page.submit(late).await,
        SubmitOutcome::Rejected(BidRejection::DeadlineOver)
    );
    assert!(posted(&api).is_empty());
}

#[tokio::test]
async fn offered_deadline_after_job_deadline_is_refused() {
    let api = FakeApi::with_job(job());
    let mut page = loaded(&api, Session::signed_in(BIDDER)).await;
    fill(&mut page, "200", job().deadline + Duration::days(3));
    assert_eq!(
        page.submit(now()).await,
        SubmitOutcome::Rejected(BidRejection::DeadlineBeyondJob)
    );
    assert!(posted(&api).is_empty());
}

#[tokio::test]
async fn price_over_max_is_refused() {
    let api = FakeApi::with_job(job());
    let mut page = loaded(&api, Session::signed_in(BIDDER)).await;
    fill(&mut page, "500.5", now());
    let outcome = page.submit(now()).await;
    assert_eq!(outcome, SubmitOutcome::Rejected(BidRejection::OverMaxPrice(500.0)));
    assert_eq!(outcome.to_string(), "You shouldn't bid over max-price: $500!");
    assert!(posted(&api).is_empty());
    // a refused bid keeps what was typed
    assert_eq!(page.form.price, "500.5");
}

#[tokio::test]
async fn non_numeric_price_is_refused() {
    let api = FakeApi::with_job(job());
    let mut page = loaded(&api, Session::signed_in(BIDDER)).await;
    fill(&mut page, "cheap", now());
    assert_eq!(
        page.submit(now()).await,
        SubmitOutcome::Rejected(BidRejection::InvalidPrice("cheap".into()))
    );
    assert!(posted(&api).is_empty());
}

#[tokio::test]
async fn placed_bid_clears_form_and_redirects() {
    let api = FakeApi::with_job(job());
    let mut page = loaded(&api, Session::signed_in(BIDDER)).await;
    let offered = job().deadline - Duration::days(2);
    fill(&mut page, " 350 ", offered);

    let outcome = page.submit(now()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Placed {
            inserted_id: "new-bid-1".into(),
            redirect: Route::MyBids,
        }
    );
    assert_eq!(Route::MyBids.path(), "/my-bids");
    assert!(page.form.price.is_empty());
    assert!(page.form.comment.is_empty());
    assert_eq!(page.form.deadline, offered);

    let Some(Call::AddBid(sent)) = posted(&api).pop() else {
        panic!("no bid was posted");
    };
    assert_eq!(sent.title, "Build a landing page");
    assert_eq!(sent.buyer_email, BUYER);
    assert_eq!(sent.email, BIDDER);
    assert_eq!(sent.price, 350.0);
    assert_eq!(sent.comment, "I can start right away");
    assert_eq!(sent.bid_deadline, offered);
    assert_eq!(sent.job_id, job().id);
    assert_eq!(sent.status, BidStatus::Pending);
}

#[tokio::test]
async fn no_inserted_id_means_no_redirect() {
    let api = FakeApi {
        add_bid: Ok(InsertResponse::default()),
        ..FakeApi::with_job(job())
    };
    let mut page = loaded(&api, Session::signed_in(BIDDER)).await;
    fill(&mut page, "300", now());

    let outcome = page.submit(now()).await;
    assert_eq!(outcome, SubmitOutcome::Submitted);
    assert!(outcome.is_success());
    assert!(page.form.price.is_empty());
    assert_eq!(posted(&api).len(), 1);
}

#[tokio::test]
async fn server_message_is_surfaced() {
    let api = FakeApi {
        add_bid: Err((400, Some("You have already placed a bid on this job".into()))),
        ..FakeApi::with_job(job())
    };
    let mut page = loaded(&api, Session::signed_in(BIDDER)).await;
    fill(&mut page, "300", now());

    let outcome = page.submit(now()).await;
    assert_eq!(
        outcome,
        SubmitOutcome::Failed("You have already placed a bid on this job".into())
    );
    assert_eq!(page.form.price, "300");
}

#[tokio::test]
async fn generic_message_without_server_message() {
    for message in [None, Some(String::new())] {
        let api = FakeApi {
            add_bid: Err((503, message)),
            ..FakeApi::with_job(job())
        };
        let mut page = loaded(&api, Session::signed_in(BIDDER)).await;
        fill(&mut page, "300", now());
        assert_eq!(
            page.submit(now()).await,
            SubmitOutcome::Failed(SUBMIT_ERROR.into())
        );
    }
}

proptest! {
#[test]
fn a_bid_is_posted_exactly_when_it_validates(
    j in any::<Job>(),
    price in 0u32..20_000,
    now_offset in -200_000i64..200_000,
    offer_offset in -200_000i64..200_000,
) {
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let now = j.deadline + Duration::seconds(now_offset);
    let offered = j.deadline + Duration::seconds(offer_offset);
    let expected = validate_bid(&j, BIDDER, price as f64, offered, now);

    let api = FakeApi::with_job(j.clone());
    let outcome = rt.block_on(async {
        let mut page = JobDetails::new(&api, Session::signed_in(BIDDER), j.id.clone(), now);
        page.load().await;
        page.form.price = price.to_string();
        page.form.deadline = offered;
        page.submit(now).await
    });

    match expected {
        Ok(()) => {
            prop_assert!(outcome.is_success());
            prop_assert_eq!(posted(&api).len(), 1);
        }
        Err(reason) => {
            prop_assert_eq!(outcome, SubmitOutcome::Rejected(reason));
            prop_assert!(posted(&api).is_empty());
        }
    }
}
}
