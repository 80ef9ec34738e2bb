use crate::helpers::postgres_repos;
use promptly_api::domain::{
    errors::DomainError,
    prompt::{entity::NewPrompt, repository::PromptRepository, value_objects::PromptOutput},
    report::{
        entity::{ReportEntry, ReportTarget},
        repository::ReportRepository,
    },
    user::{entity::NewUser, repository::UserRepository},
};
use uuid::Uuid;

fn new_prompt(owner: Uuid) -> NewPrompt {
    NewPrompt {
        title: "Lighthouse".into(),
        tags: vec!["sea".into()],
        user_id: owner,
        input: "a lighthouse at dusk".into(),
        output: PromptOutput::new("done", Some("https://img.example/l.png".into())),
        ai_model: "gpt-4o".into(),
    }
}

#[tokio::test]
async fn duplicate_report_is_rejected_by_the_upsert() {
    let Some(repos) = postgres_repos().await else {
        return;
    };
    let target = ReportTarget::Prompt(Uuid::now_v7());
    let reporter = Uuid::now_v7();

    let first = repos
        .reports
        .submit(target, ReportEntry::new(reporter, "Spam"))
        .await
        .expect("first report");
    assert!(first.created);

    let again = repos
        .reports
        .submit(target, ReportEntry::new(reporter, "Still spam"))
        .await;
    assert_eq!(again.unwrap_err(), DomainError::AlreadyReported);

    let second = repos
        .reports
        .submit(target, ReportEntry::new(Uuid::now_v7(), "Offensive"))
        .await
        .expect("second reporter");
    assert!(!second.created);
    assert_eq!(second.report.id, first.report.id);
    assert_eq!(second.report.reasons(), vec!["Spam", "Offensive"]);
}

#[tokio::test]
async fn concurrent_first_reports_converge_on_one_row() {
    let Some(repos) = postgres_repos().await else {
        return;
    };
    let target = ReportTarget::Comment(Uuid::now_v7());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let reports = repos.reports.clone();
            tokio::spawn(async move {
                reports
                    .submit(target, ReportEntry::new(Uuid::now_v7(), format!("reason {}", i)))
                    .await
            })
        })
        .collect();

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().expect("submit").created {
            created += 1;
        }
    }
    assert_eq!(created, 1);

    let report = repos
        .reports
        .find_by_target(target)
        .await
        .unwrap()
        .expect("report row");
    assert_eq!(report.report_count(), 16);
}

#[tokio::test]
async fn approve_by_target_id_removes_the_group() {
    let Some(repos) = postgres_repos().await else {
        return;
    };
    let target = ReportTarget::Prompt(Uuid::now_v7());
    repos
        .reports
        .submit(target, ReportEntry::new(Uuid::now_v7(), "Spam"))
        .await
        .unwrap();

    let removed = repos.reports.delete_by_target_id(target.id()).await.unwrap();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].target, target);
    assert!(repos.reports.find_by_target(target).await.unwrap().is_none());
}

#[tokio::test]
async fn like_toggle_twice_restores_the_prompt() {
    let Some(repos) = postgres_repos().await else {
        return;
    };
    let prompt = repos.prompts.create(&new_prompt(Uuid::now_v7())).await.unwrap();
    let fan = Uuid::now_v7();

    let liked = repos.prompts.toggle_like(prompt.id, fan).await.unwrap();
    assert!(liked.is_liked);
    assert_eq!(liked.likes, 1);

    let unliked = repos.prompts.toggle_like(prompt.id, fan).await.unwrap();
    assert!(!unliked.is_liked);
    assert_eq!(unliked.likes, 0);

    let stored = repos.prompts.find_by_id(prompt.id).await.unwrap().unwrap();
    assert!(stored.liked_by.is_empty());
    assert_eq!(stored.output, prompt.output);

    let missing = repos.prompts.toggle_like(Uuid::now_v7(), fan).await;
    assert!(matches!(missing, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn concurrent_likes_keep_count_equal_to_likers() {
    let Some(repos) = postgres_repos().await else {
        return;
    };
    let prompt = repos.prompts.create(&new_prompt(Uuid::now_v7())).await.unwrap();

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let prompts = repos.prompts.clone();
            tokio::spawn(async move { prompts.toggle_like(prompt.id, Uuid::now_v7()).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().expect("toggle");
    }

    let stored = repos.prompts.find_by_id(prompt.id).await.unwrap().unwrap();
    assert_eq!(stored.likes, 32);
    assert_eq!(stored.liked_by.len(), 32);
}

#[tokio::test]
async fn bookmark_toggle_flips_membership() {
    let Some(repos) = postgres_repos().await else {
        return;
    };
    let name = format!("pg_{}", &Uuid::now_v7().simple().to_string()[20..]);
    let user = repos
        .users
        .create(&NewUser {
            username: name.clone(),
            email: format!("{}@example.com", name),
            password_hash: "hash".into(),
            profile_picture: None,
        })
        .await
        .unwrap();
    let prompt_id = Uuid::now_v7();

    assert!(repos.users.toggle_bookmark(user.id, prompt_id).await.unwrap());
    assert!(!repos.users.toggle_bookmark(user.id, prompt_id).await.unwrap());
    let stored = repos.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.bookmarked_prompts.is_empty());

    repos.users.delete(user.id).await.unwrap();
}
