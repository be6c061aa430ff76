//!
//! notarium CLI binary
//! -------------------
//! Command-line client for the notarial document registry. Runs one-shot
//! document queries or an interactive interpreter with login, search,
//! registration and activity-log commands.

use std::env;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;

use notarium::access;
use notarium::api::types::{Document, DocumentFilter, NewDocument};
use notarium::api::RegistryClient;
use notarium::config::{self, Endpoints};
use notarium::latest::LatestSlot;
use notarium::session::SessionManager;
use notarium::token_store::FileTokenStore;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} --list [--auth-url <u>] [--documents-url <u>] [--activity-url <u>]\n  {program} --search \"<text>\" [url flags]\n  {program} --repl [url flags]    # start interactive interpreter\n\nFlags:\n  --auth-url <url>         Authentication service base URL (env {auth})\n  --documents-url <url>    Documents service base URL (env {documents})\n  --activity-url <url>     Activity service base URL (env {activity})\n  --token-file <path>      Session token file (env {token}; default ~/.notarium/token)\n  --list                   One-shot: print all documents\n  --search <text>          One-shot: print documents matching <text>\n  --repl                   Start interactive mode\n  -h, --help               Show this help\n\nInteractive commands:\n  login <email> <password>          authenticate and persist the session\n  logout                            clear the session and stored token\n  whoami                            show the logged-in user\n  list                              list all documents\n  search <text>                     search documents by number/party name\n  filter [type=<t>] [status=<s>]    list with exact-match filters\n  register                          register a document (prompts for fields)\n  history                           show your activity log\n  status                            show connection and session info\n  help                              show this help\n  quit | exit                       exit the interpreter",
        program = program,
        auth = config::ENV_AUTH_URL,
        documents = config::ENV_DOCUMENTS_URL,
        activity = config::ENV_ACTIVITY_URL,
        token = config::ENV_TOKEN_FILE,
    );
}

fn print_documents(docs: &[Document]) {
    if docs.is_empty() {
        println!("no documents");
        return;
    }
    for d in docs {
        println!(
            "{:<16} {:<20} {:<16} {:<24} {}",
            d.number,
            d.doc_type,
            d.status,
            d.party1_name,
            d.subject
        );
    }
    println!("documents: {}", docs.len());
}

fn prompt(label: &str) -> String {
    print!("{}: ", label);
    let _ = io::stdout().flush();
    let mut s = String::new();
    let _ = io::stdin().read_line(&mut s);
    s.trim().to_string()
}

fn opt(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut auth_url: Option<String> = None;
    let mut documents_url: Option<String> = None;
    let mut activity_url: Option<String> = None;
    let mut token_file: Option<String> = None;
    let mut list: bool = false;
    let mut search: Option<String> = None;
    let mut repl: bool = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--auth-url" => {
                if i + 1 >= args.len() { eprintln!("--auth-url requires a value"); print_usage(&program); std::process::exit(2); }
                auth_url = Some(args[i+1].clone());
                i += 2; continue;
            }
            "--documents-url" => {
                if i + 1 >= args.len() { eprintln!("--documents-url requires a value"); print_usage(&program); std::process::exit(2); }
                documents_url = Some(args[i+1].clone());
                i += 2; continue;
            }
            "--activity-url" => {
                if i + 1 >= args.len() { eprintln!("--activity-url requires a value"); print_usage(&program); std::process::exit(2); }
                activity_url = Some(args[i+1].clone());
                i += 2; continue;
            }
            "--token-file" => {
                if i + 1 >= args.len() { eprintln!("--token-file requires a value"); print_usage(&program); std::process::exit(2); }
                token_file = Some(args[i+1].clone());
                i += 2; continue;
            }
            "--list" => { list = true; i += 1; continue; }
            "--search" => {
                if i + 1 >= args.len() { eprintln!("--search requires a value"); print_usage(&program); std::process::exit(2); }
                search = Some(args[i+1].clone());
                i += 2; continue;
            }
            "--repl" => { repl = true; i += 1; continue; }
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            other => {
                eprintln!("Unknown flag: {}", other);
                print_usage(&program);
                std::process::exit(2);
            }
        }
    }

    let endpoints = match (auth_url, documents_url, activity_url) {
        (Some(a), Some(d), Some(ac)) => Endpoints::new(&a, &d, &ac)?,
        (None, None, None) => Endpoints::from_env()?,
        (a, d, ac) => Endpoints::new(
            &a.or_else(|| env::var(config::ENV_AUTH_URL).ok()).unwrap_or_default(),
            &d.or_else(|| env::var(config::ENV_DOCUMENTS_URL).ok()).unwrap_or_default(),
            &ac.or_else(|| env::var(config::ENV_ACTIVITY_URL).ok()).unwrap_or_default(),
        )?,
    };

    let client = RegistryClient::new(endpoints)?;
    let token_path = token_file.map(std::path::PathBuf::from).unwrap_or_else(config::default_token_path);
    let session = Arc::new(SessionManager::new(
        client.clone(),
        Box::new(FileTokenStore::new(token_path)),
    ));

    if list || search.is_some() {
        let filter = match search {
            Some(text) => DocumentFilter::search(text),
            None => DocumentFilter::default(),
        };
        match client.list_documents(&filter).await {
            Ok(docs) => print_documents(&docs),
            Err(e) => { eprintln!("Error: {}", e); std::process::exit(1); }
        }
        if !repl {
            return Ok(());
        }
    }

    if !repl {
        print_usage(&program);
        return Ok(());
    }

    // Revive any persisted session before the prompt loop so `whoami` and
    // `register` see the restored identity.
    session.restore().await;
    if let Some(u) = session.user() {
        println!("restored session: {} ({})", u.full_name, u.role);
    }

    run_repl(&program, client, session).await
}

async fn run_repl(program: &str, client: RegistryClient, session: Arc<SessionManager>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut input = String::new();
    let search_slot = LatestSlot::new();
    println!("notarium interpreter. Type 'help' for commands.");
    loop {
        input.clear();
        print!("> ");
        let _ = stdout.flush();
        if stdin.read_line(&mut input).is_err() { break; }
        let line = input.trim();
        if line.is_empty() { continue; }
        let up = line.to_uppercase();
        if up == "EXIT" || up == "QUIT" { break; }
        if up == "HELP" { print_usage(program); continue; }
        if up.starts_with("LOGIN") {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 3 { eprintln!("usage: login <email> <password>"); continue; }
            match session.login(parts[1], parts[2]).await {
                Ok(user) => println!("logged in as {} ({})", user.full_name, user.role),
                Err(e) => eprintln!("login failed: {}", e.message()),
            }
            continue;
        }
        if up == "LOGOUT" {
            session.logout();
            println!("logged out");
            continue;
        }
        if up == "WHOAMI" {
            match session.user() {
                Some(u) => println!("{} <{}> role={} region={}", u.full_name, u.email, u.role, u.region.as_deref().unwrap_or("-")),
                None => println!("not logged in"),
            }
            continue;
        }
        if up == "STATUS" {
            println!("auth:      {}", client.endpoints().auth);
            println!("documents: {}", client.endpoints().documents);
            println!("activity:  {}", client.endpoints().activity);
            match session.user() {
                Some(u) => println!("session:   {} (can register: {})", u.email, session.can_register()),
                None => println!("session:   none"),
            }
            continue;
        }
        if up == "LIST" {
            match client.list_documents(&DocumentFilter::default()).await {
                Ok(docs) => print_documents(&docs),
                Err(e) => eprintln!("error: {}", e.message()),
            }
            continue;
        }
        if up.starts_with("SEARCH ") {
            let text = line[7..].trim();
            let ticket = search_slot.begin();
            match client.list_documents(&DocumentFilter::search(text)).await {
                // Only the newest in-flight search may print; a superseded
                // one is dropped instead of overwriting fresher output.
                Ok(docs) => {
                    if search_slot.accept(ticket) {
                        print_documents(&docs);
                    }
                }
                Err(e) => eprintln!("error: {}", e.message()),
            }
            continue;
        }
        if up.starts_with("FILTER") {
            let mut filter = DocumentFilter::default();
            for part in line.split_whitespace().skip(1) {
                if let Some(v) = part.strip_prefix("type=") {
                    filter.doc_type = Some(v.to_string());
                } else if let Some(v) = part.strip_prefix("status=") {
                    filter.status = Some(v.to_string());
                } else {
                    eprintln!("usage: filter [type=<t>] [status=<s>]");
                }
            }
            match client.list_documents(&filter).await {
                Ok(docs) => print_documents(&docs),
                Err(e) => eprintln!("error: {}", e.message()),
            }
            continue;
        }
        if up == "REGISTER" {
            let Some(user) = session.user() else {
                eprintln!("not logged in");
                continue;
            };
            if !access::can_register(&access::Role::parse(&user.role)) {
                eprintln!("role '{}' may not register documents", user.role);
                continue;
            }
            let doc = NewDocument {
                document_type: prompt("document type"),
                document_date: prompt("document date (YYYY-MM-DD)"),
                party1_name: prompt("party 1 name"),
                party1_passport: prompt("party 1 passport"),
                party2_name: opt(prompt("party 2 name (optional)")),
                party2_passport: opt(prompt("party 2 passport (optional)")),
                subject: prompt("subject"),
                notes: opt(prompt("notes (optional)")),
            };
            let token = session.token().unwrap_or_default();
            match client.create_document(&token, &doc).await {
                Ok(d) => println!("registered {} ({})", d.number, d.status),
                Err(e) => eprintln!("registration failed: {}", e.message()),
            }
            continue;
        }
        if up == "HISTORY" {
            let Some(token) = session.token() else {
                eprintln!("not logged in");
                continue;
            };
            match client.activity_history(&token).await {
                Ok(items) => {
                    for a in &items {
                        println!(
                            "{:<20} {:<12} {:<16} {}",
                            a.created_at.as_deref().unwrap_or("-"),
                            a.action_type,
                            a.document_number.as_deref().unwrap_or("-"),
                            a.description
                        );
                    }
                    println!("entries: {}", items.len());
                }
                Err(e) => eprintln!("error: {}", e.message()),
            }
            continue;
        }
        eprintln!("unknown command: {} (type 'help')", line);
    }
    Ok(())
}
