use chrono::{TimeZone, Utc};
use habitsync_core::{
    ChallengeDraft, ChallengeFilter, ChallengeService, ChallengeType, Difficulty, FixedClock,
    HabitDraft, HabitFrequency, HabitService, JoinOutcome, KvBackend, LocalStore,
    MemoryKvBackend, ProfileService, ProfileUpdate, ServiceError, StoreError, StoreOptions,
    CHALLENGES_KEY, HABITS_KEY, LOCAL_PROFILE_ID, USER_KEY,
};

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2026, 5, 10, 7, 0, 0).unwrap())
}

fn profile(name: &str, email: &str) -> ProfileUpdate {
    ProfileUpdate {
        name: name.to_string(),
        email: email.to_string(),
        bio: "Building better habits".to_string(),
        points: 2500,
        streak_count: 12,
    }
}

#[test]
fn meditate_scenario_end_to_end() {
    let store = LocalStore::open_sqlite_in_memory(StoreOptions::default()).unwrap();
    let habits = HabitService::with_clock(&store, clock());

    let created = habits
        .add(HabitDraft::new("Meditate", HabitFrequency::Daily))
        .unwrap();

    let stored = store.get_habits().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].title, "Meditate");
    assert_eq!(stored[0].streak, 0);
    assert!(!stored[0].completed);
    assert_eq!(stored[0], created);

    let toggled = habits.toggle(&created.id).unwrap().unwrap();
    assert!(toggled.completed);
    assert!(store.get_habits().unwrap()[0].completed);
}

#[test]
fn habit_title_is_trimmed_and_must_not_be_blank() {
    let store = LocalStore::in_memory(StoreOptions::default());
    let habits = HabitService::new(&store);

    let created = habits
        .add(HabitDraft::new("  Read 20 pages ", HabitFrequency::Daily))
        .unwrap();
    assert_eq!(created.title, "Read 20 pages");

    let err = habits
        .add(HabitDraft::new("   ", HabitFrequency::Weekly))
        .unwrap_err();
    assert!(matches!(err, ServiceError::BlankTitle));
    assert_eq!(store.get_habits().unwrap().len(), 1);
}

#[test]
fn toggle_unknown_habit_is_a_silent_no_op() {
    let store = LocalStore::in_memory(StoreOptions::default());
    let habits = HabitService::new(&store);

    assert_eq!(habits.toggle("ghost").unwrap(), None);
    assert!(store.backend().is_empty());
}

#[test]
fn dashboard_stats_follow_stored_habits() {
    let store = LocalStore::in_memory(StoreOptions::default());
    let habits = HabitService::with_clock(&store, clock());
    let a = habits.add(HabitDraft::new("a", HabitFrequency::Daily)).unwrap();
    habits.add(HabitDraft::new("b", HabitFrequency::Daily)).unwrap();
    habits.add(HabitDraft::new("c", HabitFrequency::Weekly)).unwrap();
    habits.toggle(&a.id).unwrap();

    let stats = habits.dashboard_stats().unwrap();
    assert_eq!(stats.active_habits, 3);
    assert_eq!(stats.current_streak, 0);
    assert_eq!(stats.completion_rate_percent, 33);
}

#[test]
fn create_and_filter_challenges() {
    let store = LocalStore::in_memory(StoreOptions::default());
    let service = ChallengeService::with_clock(&store, clock());
    service
        .create(ChallengeDraft::new("5k", ChallengeType::Fitness, Difficulty::Hard))
        .unwrap();
    let focus = service
        .create(ChallengeDraft::new(
            "Deep work",
            ChallengeType::Productivity,
            Difficulty::Medium,
        ))
        .unwrap();

    assert_eq!(service.list(ChallengeFilter::All).unwrap().len(), 2);
    assert_eq!(
        service
            .list(ChallengeFilter::Type(ChallengeType::Productivity))
            .unwrap(),
        vec![focus.clone()]
    );

    let summary = service.summary(&focus).unwrap();
    assert_eq!(summary.duration_days, 30);
    assert_eq!(summary.participant_count, 0);
    assert!(!summary.joined);
}

#[test]
fn join_is_idempotent_at_service_level() {
    let store = LocalStore::in_memory(StoreOptions::default());
    let service = ChallengeService::with_clock(&store, clock());
    let challenge = service.create(ChallengeDraft::default()).unwrap();

    assert_eq!(service.join(&challenge.id).unwrap(), JoinOutcome::Joined);
    assert_eq!(service.join(&challenge.id).unwrap(), JoinOutcome::AlreadyJoined);
    assert_eq!(service.join("missing").unwrap(), JoinOutcome::NotFound);

    let stored = store.get_challenges().unwrap();
    assert_eq!(stored[0].participants, vec![LOCAL_PROFILE_ID]);
    assert!(service.summary(&stored[0]).unwrap().joined);
}

#[test]
fn profile_membership_stays_in_sync_with_participants() {
    let store = LocalStore::in_memory(StoreOptions::default());
    let challenges = ChallengeService::with_clock(&store, clock());
    let profiles = ProfileService::new(&store);

    let early = challenges.create(ChallengeDraft::default()).unwrap();
    let late = challenges
        .create(ChallengeDraft::new("Breathe", ChallengeType::Mindfulness, Difficulty::Easy))
        .unwrap();

    // Joined before any profile existed.
    challenges.join(&early.id).unwrap();

    let saved = profiles.save(profile("Alex Thompson", "alex@example.com")).unwrap();
    assert_eq!(saved.id, LOCAL_PROFILE_ID);
    assert_eq!(saved.challenges, vec![early.id.clone()]);

    challenges.join(&late.id).unwrap();
    let loaded = profiles.load().unwrap().unwrap();
    assert_eq!(loaded.challenges, vec![early.id, late.id]);
    assert_eq!(loaded.points, 2500);
    assert_eq!(loaded.streak_count, 12);
}

#[test]
fn participant_id_follows_stored_profile_id() {
    let store = LocalStore::in_memory(StoreOptions::default());
    let service = ChallengeService::with_clock(&store, clock());
    assert_eq!(service.participant_id().unwrap(), LOCAL_PROFILE_ID);

    let mut user = habitsync_core::User::new("u-42", "Sam", "sam@example.com");
    user.points = 10;
    store.set_user(&user).unwrap();
    let challenge = service.create(ChallengeDraft::default()).unwrap();
    service.join(&challenge.id).unwrap();

    assert_eq!(store.get_challenges().unwrap()[0].participants, vec!["u-42"]);
    assert_eq!(
        store.get_user().unwrap().unwrap().challenges,
        vec![challenge.id]
    );
}

#[test]
fn profile_save_validates_name_and_email() {
    let store = LocalStore::in_memory(StoreOptions::default());
    let profiles = ProfileService::new(&store);

    assert!(matches!(
        profiles.save(profile("  ", "alex@example.com")),
        Err(ServiceError::BlankName)
    ));
    assert!(matches!(
        profiles.save(profile("Alex", "alex.example.com")),
        Err(ServiceError::InvalidEmail(value)) if value == "alex.example.com"
    ));
    assert_eq!(profiles.load().unwrap(), None);

    let saved = profiles
        .save(profile(" Alex ", " alex@example.com "))
        .unwrap();
    assert_eq!(saved.name, "Alex");
    assert_eq!(saved.email, "alex@example.com");
}

#[test]
fn profile_save_overwrites_single_record_and_keeps_id() {
    let store = LocalStore::in_memory(StoreOptions::default());
    let profiles = ProfileService::new(&store);
    store
        .set_user(&habitsync_core::User::new("legacy-1", "Old", "old@example.com"))
        .unwrap();

    let saved = profiles.save(profile("New", "new@example.com")).unwrap();
    assert_eq!(saved.id, "legacy-1");
    assert_eq!(profiles.load().unwrap(), Some(saved));
}

#[test]
fn profile_save_keeps_avatar_and_updates_bio() {
    let legacy = r#"{"id":"1","name":"Alex","email":"alex@example.com",
        "bio":"Old bio","avatar":"https://x/a.png","points":10,"streakCount":2,
        "habits":[],"challenges":[]}"#;
    let store = LocalStore::new(
        MemoryKvBackend::with_entries([(USER_KEY, legacy)]),
        StoreOptions::default(),
    );
    let profiles = ProfileService::new(&store);

    let saved = profiles.save(profile("Alex", "alex@example.com")).unwrap();
    assert_eq!(saved.id, "1");
    assert_eq!(saved.bio, "Building better habits");
    assert_eq!(saved.avatar, "https://x/a.png");

    let raw = store.backend().get(USER_KEY).unwrap().unwrap();
    assert!(raw.contains("\"bio\":\"Building better habits\""));
    assert!(raw.contains("\"avatar\":\"https://x/a.png\""));
}

#[test]
fn writes_fail_instead_of_overwriting_a_corrupt_slot() {
    let habits_text = r#"[{"id":"h1","title":"Swim","description":"","frequency":"daily",
        "streak":2,"completed":false,"createdAt":"2024-05-01T07:30:00.000Z"},
        {"id":"h2","title":"Run","description":"","frequency":"hourly",
        "streak":0,"completed":false,"createdAt":"2024-05-01T07:30:00.000Z"}]"#;
    let store = LocalStore::new(
        MemoryKvBackend::with_entries([(HABITS_KEY, habits_text)]),
        StoreOptions::default(),
    );
    let habits = HabitService::with_clock(&store, clock());

    assert!(habits.list().unwrap().is_empty());
    assert!(matches!(
        habits.add(HabitDraft::new("Meditate", HabitFrequency::Daily)),
        Err(ServiceError::Store(StoreError::CorruptState { key, .. })) if key == HABITS_KEY
    ));
    assert!(habits.toggle("h1").is_err());
    assert_eq!(
        store.backend().get(HABITS_KEY).unwrap().as_deref(),
        Some(habits_text)
    );

    let challenges_text = "[{\"id\":";
    let store = LocalStore::new(
        MemoryKvBackend::with_entries([(CHALLENGES_KEY, challenges_text)]),
        StoreOptions::default(),
    );
    let challenges = ChallengeService::with_clock(&store, clock());

    assert!(matches!(
        challenges.create(ChallengeDraft::default()),
        Err(ServiceError::Store(StoreError::CorruptState { .. }))
    ));
    assert!(challenges.join("c1").is_err());
    assert_eq!(
        store.backend().get(CHALLENGES_KEY).unwrap().as_deref(),
        Some(challenges_text)
    );
}
