//! Use-case tests against the in-memory repository

#[cfg(test)]
mod support {
    use std::sync::Arc;
    use std::sync::OnceLock;

    use crate::application::{CreateUserInput, CreateUserUseCase};
    use crate::domain::entity::{level_record::LevelRecord, score_record::ScoreRecord, user::User};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{Email, RawPassword, UserId, UserName, UserPassword};
    use crate::{MemoryProgressRepository, ProgressConfig};

    pub struct Ctx {
        pub repo: Arc<MemoryProgressRepository>,
        pub config: Arc<ProgressConfig>,
    }

    pub fn ctx() -> Ctx {
        Ctx {
            repo: Arc::new(MemoryProgressRepository::new()),
            config: Arc::new(ProgressConfig::with_random_secret()),
        }
    }

    pub async fn create(ctx: &Ctx, user_name: &str, password: &str) -> UserId {
        CreateUserUseCase::new(ctx.repo.clone(), ctx.config.clone())
            .execute(CreateUserInput {
                user_name: user_name.to_string(),
                email: format!("{}@example.com", user_name.replace(' ', "")),
                password: password.to_string(),
            })
            .await
            .unwrap()
            .user_id
    }

    /// Insert a user without hashing a password per call
    pub async fn seed(ctx: &Ctx, user_name: &str) -> UserId {
        static HASH: OnceLock<UserPassword> = OnceLock::new();
        let hash = HASH.get_or_init(|| {
            let raw = RawPassword::new("seeded".to_string()).unwrap();
            UserPassword::from_raw(&raw, None).unwrap()
        });

        let user = User::new(
            UserName::new(user_name).unwrap(),
            Email::new("seed@example.com").unwrap(),
            hash.clone(),
        );
        let score = ScoreRecord::initial(&user);
        let levels = LevelRecord::initial(user.user_id, ctx.config.default_level_count);
        ctx.repo
            .create_with_dependents(&user, &score, &levels)
            .await
            .unwrap();
        user.user_id
    }
}

#[cfg(test)]
mod account_tests {
    use super::support::*;
    use crate::ProgressError;
    use crate::application::{
        AuthenticateInput, AuthenticateUseCase, CreateUserInput, CreateUserUseCase,
        DeleteUserUseCase, GetProfileUseCase,
    };
    use crate::domain::value_object::UserId;

    fn login(user_name: &str, password: &str) -> AuthenticateInput {
        AuthenticateInput {
            user_name: user_name.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_authenticate() {
        let ctx = ctx();
        let user_id = create(&ctx, "alice", "x").await;

        let output = AuthenticateUseCase::new(ctx.repo.clone(), ctx.config.clone())
            .execute(login("alice", "x"))
            .await
            .unwrap();
        assert_eq!(output.user_id, user_id);
        assert_eq!(output.user_name.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let ctx = ctx();
        create(&ctx, "alice", "x").await;
        let use_case = AuthenticateUseCase::new(ctx.repo.clone(), ctx.config.clone());

        for (user_name, password) in [
            ("alice", "y"),
            ("nobody", "x"),
            ("Alice", "x"),
            ("", "x"),
            ("alice", ""),
            ("   ", "   "),
        ] {
            let err = use_case.execute(login(user_name, password)).await.unwrap_err();
            assert!(
                matches!(err, ProgressError::InvalidCredentials),
                "{user_name:?}/{password:?} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_duplicate_user_name_is_conflict() {
        let ctx = ctx();
        create(&ctx, "alice", "x").await;
        let before = ctx.repo.row_counts().await;

        let err = CreateUserUseCase::new(ctx.repo.clone(), ctx.config.clone())
            .execute(CreateUserInput {
                user_name: "alice".to_string(),
                email: "other@example.com".to_string(),
                password: "y".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ProgressError::UserNameTaken));
        assert_eq!(ctx.repo.row_counts().await, before);
    }

    #[tokio::test]
    async fn test_user_names_are_case_sensitive() {
        let ctx = ctx();
        let lower = create(&ctx, "alice", "x").await;
        let upper = create(&ctx, "Alice", "x").await;
        assert_ne!(lower, upper);
    }

    #[tokio::test]
    async fn test_invalid_input_creates_nothing() {
        let ctx = ctx();
        let use_case = CreateUserUseCase::new(ctx.repo.clone(), ctx.config.clone());

        for (user_name, email, password) in [
            ("", "a@b.c", "x"),
            ("   ", "a@b.c", "x"),
            ("bob", "not-an-email", "x"),
            ("bob", "a@b.c", ""),
            ("bob", "a@b.c", "  "),
        ] {
            let err = use_case
                .execute(CreateUserInput {
                    user_name: user_name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await
                .unwrap_err();
            assert!(matches!(err, ProgressError::InvalidInput(_)), "{err:?}");
        }

        assert_eq!(ctx.repo.row_counts().await, (0, 0, 0));
    }

    #[tokio::test]
    async fn test_delete_removes_dependents() {
        let ctx = ctx();
        let alice = create(&ctx, "alice", "x").await;
        let bob = seed(&ctx, "bob").await;

        DeleteUserUseCase::new(ctx.repo.clone())
            .execute(&alice)
            .await
            .unwrap();

        assert_eq!(ctx.repo.row_counts().await, (1, 1, 1));
        let profile = GetProfileUseCase::new(ctx.repo.clone())
            .execute(&bob)
            .await
            .unwrap();
        assert_eq!(profile.user_name.as_str(), "bob");

        let err = AuthenticateUseCase::new(ctx.repo.clone(), ctx.config.clone())
            .execute(login("alice", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_delete_unknown_user_is_not_found() {
        let ctx = ctx();
        seed(&ctx, "bob").await;

        let err = DeleteUserUseCase::new(ctx.repo.clone())
            .execute(&UserId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ProgressError::UserNotFound));
        assert_eq!(ctx.repo.row_counts().await, (1, 1, 1));
    }

    #[tokio::test]
    async fn test_profile() {
        let ctx = ctx();
        let user_id = create(&ctx, "carol", "pw").await;

        let profile = GetProfileUseCase::new(ctx.repo.clone())
            .execute(&user_id)
            .await
            .unwrap();
        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.email.as_str(), "carol@example.com");

        let err = GetProfileUseCase::new(ctx.repo.clone())
            .execute(&UserId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::UserNotFound));
    }
}

#[cfg(test)]
mod score_tests {
    use super::support::*;
    use crate::ProgressError;
    use crate::application::{EditScoreOutcome, ScoreUseCase};
    use crate::domain::value_object::{Score, UserId};

    #[tokio::test]
    async fn test_new_account_starts_at_zero() {
        let ctx = ctx();
        let user_id = seed(&ctx, "alice").await;
        let score = ScoreUseCase::new(ctx.repo.clone(), ctx.repo.clone())
            .get(&user_id)
            .await
            .unwrap();
        assert_eq!(score, Score::ZERO);
    }

    #[tokio::test]
    async fn test_high_water_mark() {
        let ctx = ctx();
        let user_id = seed(&ctx, "alice").await;
        let use_case = ScoreUseCase::new(ctx.repo.clone(), ctx.repo.clone());

        let raised = use_case.edit(&user_id, 50).await.unwrap();
        assert_eq!(raised.outcome, EditScoreOutcome::Raised);
        assert!(raised.mutated());
        assert_eq!(raised.previous_score, Some(Score::ZERO));
        assert_eq!(raised.final_score.value(), 50);

        for attempted in [10, 49, 50, 0] {
            let unchanged = use_case.edit(&user_id, attempted).await.unwrap();
            assert_eq!(unchanged.outcome, EditScoreOutcome::Unchanged);
            assert!(!unchanged.mutated());
            assert_eq!(unchanged.final_score.value(), 50);
            assert_eq!(unchanged.attempted_score.value(), attempted);
        }

        assert_eq!(use_case.get(&user_id).await.unwrap().value(), 50);
    }

    #[tokio::test]
    async fn test_missing_record_is_created() {
        let ctx = ctx();
        let user_id = seed(&ctx, "alice").await;
        assert!(ctx.repo.remove_score(&user_id).await);
        let use_case = ScoreUseCase::new(ctx.repo.clone(), ctx.repo.clone());

        let err = use_case.get(&user_id).await.unwrap_err();
        assert!(matches!(err, ProgressError::RecordNotFound(_)));

        let created = use_case.edit(&user_id, 7).await.unwrap();
        assert_eq!(created.outcome, EditScoreOutcome::Created);
        assert!(created.mutated());
        assert_eq!(created.previous_score, None);
        assert_eq!(use_case.get(&user_id).await.unwrap().value(), 7);
    }

    #[tokio::test]
    async fn test_negative_is_rejected_without_mutation() {
        let ctx = ctx();
        let user_id = seed(&ctx, "alice").await;
        let use_case = ScoreUseCase::new(ctx.repo.clone(), ctx.repo.clone());

        let err = use_case.edit(&user_id, -1).await.unwrap_err();
        assert!(matches!(err, ProgressError::InvalidInput(_)));
        assert_eq!(use_case.get(&user_id).await.unwrap(), Score::ZERO);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let ctx = ctx();
        let use_case = ScoreUseCase::new(ctx.repo.clone(), ctx.repo.clone());
        let ghost = UserId::new();

        assert!(matches!(
            use_case.get(&ghost).await.unwrap_err(),
            ProgressError::UserNotFound
        ));
        assert!(matches!(
            use_case.edit(&ghost, 10).await.unwrap_err(),
            ProgressError::UserNotFound
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_edits_converge_to_maximum() {
        let ctx = ctx();
        let user_id = seed(&ctx, "alice").await;
        let values: Vec<i64> = vec![5, 300, 42, 17, 299, 1, 150, 300, 88, 120, 7, 256, 64, 3, 200, 99];

        let mut handles = Vec::new();
        for value in values.clone() {
            let repo = ctx.repo.clone();
            handles.push(tokio::spawn(async move {
                ScoreUseCase::new(repo.clone(), repo)
                    .edit(&user_id, value)
                    .await
            }));
        }

        let mut raises = 0;
        for handle in handles {
            let output = handle.await.unwrap().unwrap();
            assert!(output.final_score.value() >= output.attempted_score.value());
            if output.mutated() {
                raises += 1;
            }
        }

        let final_score = ScoreUseCase::new(ctx.repo.clone(), ctx.repo.clone())
            .get(&user_id)
            .await
            .unwrap();
        assert_eq!(final_score.value(), *values.iter().max().unwrap());
        assert!(raises >= 1);
    }
}

#[cfg(test)]
mod level_tests {
    use super::support::*;
    use crate::ProgressError;
    use crate::application::LevelsUseCase;
    use crate::domain::value_object::UserId;

    #[tokio::test]
    async fn test_new_account_has_default_levels() {
        let ctx = ctx();
        let user_id = seed(&ctx, "alice").await;
        let levels = LevelsUseCase::new(ctx.repo.clone(), ctx.repo.clone(), ctx.config.clone())
            .get(&user_id)
            .await
            .unwrap();
        assert_eq!(levels.as_slice(), vec![false; 20].as_slice());
    }

    #[tokio::test]
    async fn test_edit_then_read_back() {
        let ctx = ctx();
        let user_id = seed(&ctx, "alice").await;
        let use_case = LevelsUseCase::new(ctx.repo.clone(), ctx.repo.clone(), ctx.config.clone());

        for levels in [vec![true, false, true], vec![], vec![true; 25]] {
            use_case.edit(&user_id, Some(levels.clone())).await.unwrap();
            assert_eq!(use_case.get(&user_id).await.unwrap().into_inner(), levels);
        }
    }

    #[tokio::test]
    async fn test_edit_rejects_null_and_oversized() {
        let ctx = ctx();
        let user_id = seed(&ctx, "alice").await;
        let use_case = LevelsUseCase::new(ctx.repo.clone(), ctx.repo.clone(), ctx.config.clone());

        assert!(matches!(
            use_case.edit(&user_id, None).await.unwrap_err(),
            ProgressError::InvalidInput(_)
        ));
        let too_long = vec![false; ctx.config.max_level_count + 1];
        assert!(matches!(
            use_case.edit(&user_id, Some(too_long)).await.unwrap_err(),
            ProgressError::InvalidInput(_)
        ));

        assert_eq!(use_case.get(&user_id).await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let ctx = ctx();
        let use_case = LevelsUseCase::new(ctx.repo.clone(), ctx.repo.clone(), ctx.config.clone());
        let ghost = UserId::new();

        assert!(matches!(
            use_case.get(&ghost).await.unwrap_err(),
            ProgressError::UserNotFound
        ));
        assert!(matches!(
            use_case.edit(&ghost, Some(vec![true])).await.unwrap_err(),
            ProgressError::UserNotFound
        ));
    }

    #[tokio::test]
    async fn test_corrupt_stored_levels() {
        let ctx = ctx();
        let user_id = seed(&ctx, "alice").await;
        ctx.repo.put_raw_levels(&user_id, "t,true,f").await;

        let err = LevelsUseCase::new(ctx.repo.clone(), ctx.repo.clone(), ctx.config.clone())
            .get(&user_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::CorruptLevelData(_)));
        assert_eq!(err.kind(), crate::ErrorKind::Integrity);
    }

    #[tokio::test]
    async fn test_empty_stored_levels_decode_to_empty() {
        let ctx = ctx();
        let user_id = seed(&ctx, "alice").await;
        ctx.repo.put_raw_levels(&user_id, "").await;

        let levels = LevelsUseCase::new(ctx.repo.clone(), ctx.repo.clone(), ctx.config.clone())
            .get(&user_id)
            .await
            .unwrap();
        assert!(levels.is_empty());
    }
}

#[cfg(test)]
mod leaderboard_tests {
    use super::support::*;
    use crate::application::{ScoreUseCase, TopScoresUseCase};

    #[tokio::test]
    async fn test_empty_leaderboard() {
        let ctx = ctx();
        let entries = TopScoresUseCase::new(ctx.repo.clone()).execute(10).await.unwrap();
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_ordering_and_length() {
        let ctx = ctx();
        let scores = ScoreUseCase::new(ctx.repo.clone(), ctx.repo.clone());
        for (name, value) in [("a", 30), ("b", 90), ("c", 10), ("d", 90), ("e", 0)] {
            let user_id = seed(&ctx, name).await;
            if value > 0 {
                scores.edit(&user_id, value).await.unwrap();
            }
        }
        let use_case = TopScoresUseCase::new(ctx.repo.clone());

        let top = use_case.execute(3).await.unwrap();
        let names: Vec<&str> = top.iter().map(|e| e.user_name.as_str()).collect();
        // Ties keep creation order
        assert_eq!(names, ["b", "d", "a"]);
        assert_eq!(
            top.iter().map(|e| e.rank).collect::<Vec<_>>(),
            [1, 2, 3]
        );

        let all = use_case.execute(100).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|w| w[0].score >= w[1].score));

        assert!(use_case.execute(0).await.unwrap().is_empty());
    }
}

#[cfg(test)]
mod scenario_tests {
    use super::support::*;
    use crate::application::{
        AuthenticateInput, AuthenticateUseCase, LevelsUseCase, ScoreUseCase, TopScoresUseCase,
    };

    #[tokio::test]
    async fn test_alice_walkthrough() {
        let ctx = ctx();
        let user_id = create(&ctx, "alice", "x").await;

        let authenticated = AuthenticateUseCase::new(ctx.repo.clone(), ctx.config.clone())
            .execute(AuthenticateInput {
                user_name: "alice".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(authenticated.user_id, user_id);

        let scores = ScoreUseCase::new(ctx.repo.clone(), ctx.repo.clone());
        assert_eq!(scores.get(&user_id).await.unwrap().value(), 0);

        let levels = LevelsUseCase::new(ctx.repo.clone(), ctx.repo.clone(), ctx.config.clone());
        assert_eq!(levels.get(&user_id).await.unwrap().into_inner(), vec![false; 20]);

        let first = scores.edit(&user_id, 50).await.unwrap();
        assert!(first.mutated());
        assert_eq!(first.final_score.value(), 50);

        let second = scores.edit(&user_id, 10).await.unwrap();
        assert!(!second.mutated());
        assert_eq!(second.final_score.value(), 50);

        let mut completed = vec![false; 20];
        completed[0] = true;
        completed[3] = true;
        levels.edit(&user_id, Some(completed.clone())).await.unwrap();
        assert_eq!(levels.get(&user_id).await.unwrap().into_inner(), completed);

        let top = TopScoresUseCase::new(ctx.repo.clone()).execute(10).await.unwrap();
        assert!(
            top.iter()
                .any(|e| e.user_name.as_str() == "alice" && e.score.value() == 50)
        );
    }
}
