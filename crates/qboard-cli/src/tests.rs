use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use pretty_assertions::assert_eq;
use qboard_core::search::{BoardStatistics, ModuleActivity};
use qboard_core::{Module, Question, QuestionId, User};

use crate::commands::common::{
    format_question_line, load_questions, normalize_search_query, parse_question_id,
    resolve_db_path, resolve_module_filter, resolve_user_filter,
};
use crate::commands::import::import_file;
use crate::commands::related::related_questions;
use crate::commands::search::{
    format_search_page, search_questions, simple_questions, SearchArgs,
};
use crate::commands::show::format_question_detail;
use crate::commands::stats::format_statistics;
use crate::error::CliError;

const SEED: &str = r#"{
    "modules": [
        {"code": "COMP1841", "name": "Web Programming"},
        {"code": "COMP1842", "name": "Databases 101"}
    ],
    "users": [
        {"username": "alice", "email": "alice@example.com"},
        {"username": "bob", "email": "bob@example.com"}
    ],
    "questions": [
        {"title": "How to connect PDO", "content": "PDO connection fails with access denied",
         "author": "alice", "module": "COMP1841", "created_at": 1000},
        {"title": "Session handling in PHP", "content": "When should I call session_start in PHP?",
         "author": "bob", "module": "COMP1841", "created_at": 2000},
        {"title": "PDO prepared statements", "content": "Is this safer than the connect string approach?",
         "author": "bob", "module": "COMP1842", "created_at": 3000},
        {"title": "Join two tables", "content": "How do I write an inner join?",
         "author": "alice", "module": "COMP1842", "created_at": 4000}
    ]
}"#;

fn search_args(query: Option<&str>) -> SearchArgs<'_> {
    SearchArgs {
        query,
        module: None,
        user: None,
        sort: "newest",
        page: 1,
    }
}

#[test]
fn parse_question_id_trims_and_rejects_garbage() {
    assert_eq!(parse_question_id(" 42 ").unwrap(), QuestionId::new(42));
    assert!(matches!(
        parse_question_id("  "),
        Err(CliError::EmptyQuestionId)
    ));
    assert!(matches!(
        parse_question_id("abc"),
        Err(CliError::InvalidQuestionId(value)) if value == "abc"
    ));
}

#[test]
fn normalize_search_query_trims_and_rejects_empty() {
    assert_eq!(normalize_search_query("  pdo ").unwrap(), "pdo");
    assert!(matches!(
        normalize_search_query(" \t "),
        Err(CliError::EmptySearchQuery)
    ));
}

#[test]
fn resolve_db_path_prefers_explicit_path() {
    let explicit = PathBuf::from("/tmp/explicit.db");
    assert_eq!(resolve_db_path(Some(explicit.clone())).unwrap(), explicit);
}

#[test]
fn module_filter_accepts_id_or_code() {
    let modules = vec![
        Module {
            id: 3,
            code: "COMP1841".to_string(),
            name: "Web Programming".to_string(),
        },
        Module {
            id: 7,
            code: "COMP1842".to_string(),
            name: "Databases 101".to_string(),
        },
    ];

    assert_eq!(resolve_module_filter(&modules, "7").unwrap(), 7);
    assert_eq!(resolve_module_filter(&modules, "comp1841").unwrap(), 3);
    assert!(matches!(
        resolve_module_filter(&modules, "MATH101"),
        Err(CliError::UnknownModule(_))
    ));
}

#[test]
fn user_filter_accepts_id_or_username() {
    let users = vec![User {
        id: 2,
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
    }];

    assert_eq!(resolve_user_filter(&users, "2").unwrap(), 2);
    assert_eq!(resolve_user_filter(&users, "alice").unwrap(), 2);
    assert!(matches!(
        resolve_user_filter(&users, "Alice"),
        Err(CliError::UnknownUser(_))
    ));
}

#[test]
fn question_line_shows_id_module_and_author() {
    let question = Question::new(12, "How to connect PDO", "body")
        .with_author(1, "alice")
        .with_module(1, "COMP1841", "Web Programming")
        .with_created_at(0);

    let line = format_question_line(&question, 120_000);
    assert!(line.starts_with("#12"));
    assert!(line.contains("COMP1841"));
    assert!(line.contains("How to connect PDO"));
    assert!(line.ends_with("alice, 2 minutes ago"));
}

#[test]
fn question_detail_mentions_edits_and_images() {
    let mut question = Question::new(5, "Session handling", "When should I call it?")
        .with_author(2, "bob")
        .with_module(1, "COMP1841", "Web Programming")
        .with_created_at(0);

    let detail = format_question_detail(&question);
    assert!(detail.starts_with("#5 Session handling\nModule: COMP1841 - Web Programming\n"));
    assert!(detail.contains("Asked by bob on 1970-01-01 00:00 UTC"));
    assert!(!detail.contains("Edited"));
    assert!(detail.ends_with("When should I call it?"));

    question.updated_at = 60_000;
    question.image_path = Some("uploads/screenshot.png".to_string());
    let detail = format_question_detail(&question);
    assert!(detail.contains("Edited 1970-01-01 00:01 UTC"));
    assert!(detail.contains("Image: uploads/screenshot.png"));
}

#[test]
fn statistics_lines_list_popular_modules() {
    let busiest = ModuleActivity {
        module_id: 1,
        module_code: "COMP1841".to_string(),
        module_name: "Web Programming".to_string(),
        question_count: 4,
    };
    let stats = BoardStatistics {
        total_questions: 6,
        questions_this_month: 2,
        questions_today: 1,
        most_active_module: Some(busiest.clone()),
    };

    let lines = format_statistics(&stats, &[busiest]);
    assert_eq!(lines[0], "Total questions:  6");
    assert_eq!(lines[3], "Most active:      COMP1841 (4 questions)");
    assert_eq!(lines[5], "Popular modules:");
    assert!(lines[6].contains("Web Programming"));
}

#[test]
fn import_then_search_by_relevance() {
    let db_path = unique_test_db_path();
    let seed_path = write_seed_file();

    let summary = import_file(&seed_path, &db_path).unwrap();
    assert_eq!(summary.questions, 4);

    let newest = search_questions(&search_args(Some("pdo")), &db_path).unwrap();
    assert!(newest.searched);
    let titles: Vec<&str> = newest
        .page
        .items
        .iter()
        .map(|hit| hit.title.as_str())
        .collect();
    assert_eq!(titles, vec!["PDO prepared statements", "How to connect PDO"]);

    let mut args = search_args(Some("pdo"));
    args.sort = "relevance";
    let by_relevance = search_questions(&args, &db_path).unwrap();
    assert_eq!(by_relevance.page.items[0].title, "How to connect PDO");

    let mut args = search_args(Some("pdo"));
    args.module = Some("comp1842");
    let filtered = search_questions(&args, &db_path).unwrap();
    assert_eq!(filtered.page.total_count, 1);
    assert_eq!(filtered.page.items[0].module_code, "COMP1842");

    cleanup_db_files(&db_path);
    let _ = std::fs::remove_file(seed_path);
}

#[test]
fn search_without_criteria_runs_no_search() {
    let db_path = unique_test_db_path();
    let seed_path = write_seed_file();
    import_file(&seed_path, &db_path).unwrap();

    let result = search_questions(&search_args(None), &db_path).unwrap();
    assert!(!result.searched);
    assert!(result.page.items.is_empty());
    assert_eq!(
        format_search_page(&result, 0),
        vec!["Enter a query, --module or --user to search.".to_string()]
    );

    let mut args = search_args(None);
    args.user = Some("alice");
    let by_author = search_questions(&args, &db_path).unwrap();
    assert!(by_author.searched);
    assert_eq!(by_author.page.total_count, 2);
    assert_eq!(format_search_page(&by_author, 5000)[0], "Page 1 of 1 (2 results)");

    cleanup_db_files(&db_path);
    let _ = std::fs::remove_file(seed_path);
}

#[test]
fn simple_search_matches_substrings_newest_first() {
    let db_path = unique_test_db_path();
    let seed_path = write_seed_file();
    import_file(&seed_path, &db_path).unwrap();

    let titles: Vec<String> = simple_questions(" connect ", &db_path)
        .unwrap()
        .into_iter()
        .map(|question| question.title)
        .collect();
    assert_eq!(titles, vec!["PDO prepared statements", "How to connect PDO"]);

    assert!(matches!(
        simple_questions("  ", &db_path),
        Err(CliError::EmptySearchQuery)
    ));

    cleanup_db_files(&db_path);
    let _ = std::fs::remove_file(seed_path);
}

#[test]
fn related_lists_same_module_before_keyword_matches() {
    let db_path = unique_test_db_path();
    let seed_path = write_seed_file();
    import_file(&seed_path, &db_path).unwrap();

    let questions = load_questions(&db_path).unwrap();
    let subject = questions
        .iter()
        .find(|question| question.title == "How to connect PDO")
        .unwrap();

    let related = related_questions(&subject.id.to_string(), 5, &db_path).unwrap();
    let titles: Vec<&str> = related
        .iter()
        .map(|question| question.title.as_str())
        .collect();
    assert_eq!(
        titles,
        vec!["Session handling in PHP", "PDO prepared statements"]
    );

    assert!(matches!(
        related_questions("9999", 5, &db_path),
        Err(CliError::QuestionNotFound(id)) if id == "9999"
    ));

    cleanup_db_files(&db_path);
    let _ = std::fs::remove_file(seed_path);
}

#[test]
fn import_rejects_unknown_references() {
    let db_path = unique_test_db_path();
    let seed_path = unique_test_db_path().with_extension("json");
    std::fs::write(
        &seed_path,
        r#"{"questions": [{"title": "Orphan question", "content": "Nobody owns this one",
            "author": "ghost", "module": "NONE"}]}"#,
    )
    .unwrap();

    assert!(matches!(
        import_file(&seed_path, &db_path),
        Err(CliError::Core(qboard_core::Error::InvalidInput(_)))
    ));
    assert!(load_questions(&db_path).unwrap().is_empty());

    cleanup_db_files(&db_path);
    let _ = std::fs::remove_file(seed_path);
}

fn write_seed_file() -> PathBuf {
    let path = unique_test_db_path().with_extension("json");
    std::fs::write(&path, SEED).unwrap();
    path
}

fn unique_test_db_path() -> PathBuf {
    static NEXT_TEST_DB_ID: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_nanos());
    let sequence = NEXT_TEST_DB_ID.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("qboard-cli-test-{timestamp}-{sequence}.db"))
}

fn cleanup_db_files(path: &PathBuf) {
    let _ = std::fs::remove_file(path);
    let _ = std::fs::remove_file(path.with_extension("db-shm"));
    let _ = std::fs::remove_file(path.with_extension("db-wal"));
}
