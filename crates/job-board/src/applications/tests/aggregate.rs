use super::common::*;
use crate::applications::aggregate::{
    distinct_job_titles, join_with_postings, ApplicationFilter, UNKNOWN_COMPANY,
    UNKNOWN_JOB_TITLE,
};
use crate::listings::tests::common::postings;

#[test]
fn join_orders_by_applied_at_descending() {
    let jobs = postings(vec![owned_listing("Backend Engineer", OWNER, "Acme")]);
    let applications = vec![
        record("app-1", "job-000001", "a@x.test", 1),
        record("app-3", "job-000001", "c@x.test", 3),
        record("app-2", "job-000001", "b@x.test", 2),
    ];

    let views = join_with_postings(&jobs, applications);

    let ids: Vec<&str> = views
        .iter()
        .map(|view| view.application.id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["app-3", "app-2", "app-1"]);
}

#[test]
fn join_substitutes_placeholders_for_missing_postings() {
    let views = join_with_postings(&[], vec![record("app-1", "job-gone", "a@x.test", 1)]);

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].job_title, UNKNOWN_JOB_TITLE);
    assert_eq!(views[0].company_name, UNKNOWN_COMPANY);
    assert_eq!(views[0].application.job_id.0, "job-gone");
}

#[test]
fn join_is_stable_for_identical_timestamps() {
    let jobs = postings(vec![owned_listing("Backend Engineer", OWNER, "Acme")]);
    let applications = vec![
        record("app-1", "job-000001", "a@x.test", 5),
        record("app-2", "job-000001", "b@x.test", 5),
    ];

    let views = join_with_postings(&jobs, applications);

    assert_eq!(views[0].application.id.0, "app-1");
    assert_eq!(views[1].application.id.0, "app-2");
}

#[test]
fn filter_searches_across_applicant_and_job_fields() {
    let jobs = postings(vec![
        owned_listing("Backend Engineer", OWNER, "Acme"),
        owned_listing("Designer", OWNER, "Pixel Forge"),
    ]);
    let views = join_with_postings(
        &jobs,
        vec![
            record("app-1", "job-000001", "ada@x.test", 1),
            record("app-2", "job-000002", "grace@x.test", 2),
        ],
    );

    let by_company = ApplicationFilter {
        search: Some("forge".to_string()),
        job_title: None,
    };
    assert_eq!(by_company.apply(views.clone()).len(), 1);

    let by_email = ApplicationFilter {
        search: Some("ADA@".to_string()),
        job_title: None,
    };
    let found = by_email.apply(views.clone());
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].application.id.0, "app-1");

    let by_title = ApplicationFilter {
        search: None,
        job_title: Some("Designer".to_string()),
    };
    assert_eq!(by_title.apply(views.clone()).len(), 1);

    let contradictory = ApplicationFilter {
        search: Some("ada".to_string()),
        job_title: Some("Designer".to_string()),
    };
    assert!(contradictory.apply(views.clone()).is_empty());

    assert_eq!(ApplicationFilter::default().apply(views).len(), 2);
}

#[test]
fn distinct_titles_keep_first_seen_order() {
    let jobs = postings(vec![
        owned_listing("Backend Engineer", OWNER, "Acme"),
        owned_listing("Designer", OWNER, "Acme"),
    ]);
    let views = join_with_postings(
        &jobs,
        vec![
            record("app-1", "job-000002", "a@x.test", 3),
            record("app-2", "job-000001", "b@x.test", 2),
            record("app-3", "job-000002", "c@x.test", 1),
            record("app-4", "job-missing", "d@x.test", 0),
        ],
    );

    assert_eq!(
        distinct_job_titles(&views),
        vec!["Designer", "Backend Engineer", UNKNOWN_JOB_TITLE]
    );
}
