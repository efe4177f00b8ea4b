/// Command handlers
///
/// Every handler opens the page controller for its command, runs the
/// action, and turns the page's inline error (or a login redirect) into an
/// `anyhow` error for the terminal.

use crate::render;
use crate::{AiCommand, BooksCommand, CategoriesCommand, Cli, Command, ProfileCommand, SignupArgs, TextSource};
use anyhow::{bail, Context, Result};
use learnease_client::pages::dashboard::CategoryFilter;
use learnease_client::pages::{
    BookViewerPage, DashboardPage, LoginPage, RequestState, Route, SettingsPage, SignupPage,
};
use learnease_client::services::books::UploadFile;
use learnease_client::{ApiClient, ClientConfig};
use learnease_shared::auth::session::{FileSessionStore, Session};
use std::sync::Arc;
use tracing::debug;

pub async fn run(cli: Cli) -> Result<()> {
    let client = connect(&cli).await?;

    match cli.command {
        Command::Signup(args) => signup(client, args).await,
        Command::Login { email, password } => login(client, email, password).await,
        Command::Logout => {
            let mut page = DashboardPage::new(client);
            page.logout().await;
            println!("Logged out.");
            Ok(())
        }
        Command::Profile(command) => profile(client, command).await,
        Command::Password {
            current,
            new_password,
            confirm,
        } => {
            let mut page = settings(client).await?;
            page.password_form.current_password = current;
            page.password_form.new_password = new_password;
            page.password_form.confirm_new_password = confirm;

            let unmet = page.password_requirements().unmet();
            if !unmet.is_empty() {
                bail!("Password does not meet all requirements: {}", unmet.join(", "));
            }

            follow(page.change_password().await)?;
            settled(&page.password_state)?;
            println!("{}", page.password_message.unwrap_or_default());
            Ok(())
        }
        Command::Books(command) => books(client, command).await,
        Command::Categories(command) => categories(client, command).await,
        Command::Ai(command) => ai(client, command).await,
    }
}

async fn connect(cli: &Cli) -> Result<ApiClient> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(path) = &cli.session_file {
        config.session.token_path = path.clone();
    }

    debug!(base_url = %config.api.base_url, session = %config.session.token_path.display(), "Connecting");

    let store = Arc::new(FileSessionStore::new(&config.session.token_path));
    let session = Session::init(store)
        .await
        .context("Failed to read the session file")?;

    Ok(ApiClient::new(config, Arc::new(session))?)
}

/// Fails with the redirect reason when a page sends the user to login
fn follow(route: Option<Route>) -> Result<()> {
    match route {
        Some(Route::Login { message, .. }) => bail!(
            "{} Run `learnease login` first.",
            message.unwrap_or_else(|| "You are not logged in.".to_string())
        ),
        _ => Ok(()),
    }
}

/// Fails with the page's inline error, if any
fn settled<T>(state: &RequestState<T>) -> Result<()> {
    match &state.error {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

async fn signup(client: ApiClient, args: SignupArgs) -> Result<()> {
    let mut page = SignupPage::new(client);
    page.form.email = args.email;
    page.form.firstname = args.firstname;
    page.form.lastname = args.lastname;
    page.form.age = args.age;
    page.form.university_name = args.university;
    page.form.password = args.password;
    page.form.confirm_password = args.confirm_password;

    let route = page.submit().await;
    settled(&page.state)?;

    if route.is_some() {
        println!("Signup successful! Please log in.");
    }
    Ok(())
}

async fn login(client: ApiClient, email: String, password: String) -> Result<()> {
    let mut page = LoginPage::new(client);
    page.email = email;
    page.password = password;

    page.submit().await;
    settled(&page.state)?;

    println!("Logged in as {}.", page.email);
    Ok(())
}

async fn settings(client: ApiClient) -> Result<SettingsPage> {
    let mut page = SettingsPage::new(client);
    follow(page.load().await)?;
    Ok(page)
}

async fn profile(client: ApiClient, command: ProfileCommand) -> Result<()> {
    let mut page = settings(client).await?;
    settled(&page.profile_state)?;

    match command {
        ProfileCommand::Show => {}
        ProfileCommand::Update {
            firstname,
            lastname,
            age,
            university,
            image,
        } => {
            let form = &mut page.profile_form;
            if let Some(v) = firstname {
                form.firstname = v;
            }
            if let Some(v) = lastname {
                form.lastname = v;
            }
            if let Some(v) = age {
                form.age = v;
            }
            if let Some(v) = university {
                form.university_name = v;
            }
            if let Some(v) = image {
                form.image = v;
            }

            follow(page.save_profile().await)?;
            settled(&page.profile_state)?;
            if let Some(message) = &page.profile_message {
                println!("{}", message);
            }
        }
    }

    if let Some(user) = page.profile() {
        render::user(user);
    }
    Ok(())
}

async fn dashboard(client: ApiClient) -> Result<DashboardPage> {
    let mut page = DashboardPage::new(client);
    follow(page.load().await)?;
    settled(&page.state)?;
    Ok(page)
}

async fn viewer(client: ApiClient, id: &str) -> Result<BookViewerPage> {
    let mut page = BookViewerPage::new(client);
    follow(page.load(id).await)?;
    settled(&page.state)?;
    Ok(page)
}

async fn books(client: ApiClient, command: BooksCommand) -> Result<()> {
    match command {
        BooksCommand::List {
            category,
            uncategorized,
        } => {
            let mut page = dashboard(client).await?;
            page.set_filter(match (category, uncategorized) {
                (Some(id), _) => CategoryFilter::Category(id),
                (None, true) => CategoryFilter::Uncategorized,
                (None, false) => CategoryFilter::All,
            });
            render::books(&page);
        }
        BooksCommand::Upload {
            file,
            title,
            category,
        } => {
            let upload = UploadFile::from_path(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let mut page = DashboardPage::new(client);
            if !page.select_file(upload) {
                settled(&page.upload_state)?;
            }
            page.upload.title = title.unwrap_or_default();
            page.upload.category_id = category;

            follow(page.upload().await)?;
            settled(&page.upload_state)?;
            if let Some(book) = &page.upload_state.data {
                println!("Uploaded \"{}\" ({})", book.title, book.id);
            }
        }
        BooksCommand::Show { id } => {
            let page = viewer(client, &id).await?;
            if let Some(book) = &page.book {
                render::book(book, page.num_pages());
            }
        }
        BooksCommand::Download { id, output } => {
            let page = viewer(client, &id).await?;
            let document = page.document.as_ref().context("Book data not found.")?;
            let written = document
                .save_to(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Saved {} bytes to {}", written, output.display());
        }
        BooksCommand::Text { id } => {
            let text = client.book_extracted_text(&id).await?;
            println!("{}", text.content);
        }
        BooksCommand::Category { id, set, clear } => {
            let mut page = dashboard(client).await?;
            let target = if clear { None } else { set.as_deref() };

            follow(page.assign_category(&id, target).await)?;
            settled(&page.category_state)?;
            match target {
                Some(category) => println!("Moved {} to category {}", id, category),
                None => println!("Removed {} from its category", id),
            }
        }
        BooksCommand::Delete { id, yes } => {
            let mut page = dashboard(client).await?;
            if !page.request_delete(&id) {
                bail!("Book {} not found.", id);
            }
            if !yes {
                let title = page
                    .pending_delete
                    .as_ref()
                    .map(|b| b.title.clone())
                    .unwrap_or_default();
                page.cancel_delete();
                bail!("Delete \"{}\"? Re-run with --yes to confirm.", title);
            }

            follow(page.confirm_delete().await)?;
            settled(&page.delete_state)?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}

async fn categories(client: ApiClient, command: CategoriesCommand) -> Result<()> {
    let mut page = settings(client).await?;
    settled(&page.categories_state)?;

    match command {
        CategoriesCommand::List => {}
        CategoriesCommand::Create { name } => {
            page.open_create();
            page.create_modal.name = name;
            follow(page.create_category().await)?;
            settled(&page.create_modal.state)?;
        }
        CategoriesCommand::Rename { id, name } => {
            let category = find_category(&page, &id)?;
            page.open_rename(&category);
            page.rename_modal.name = name;
            follow(page.rename_category().await)?;
            settled(&page.rename_modal.state)?;
        }
        CategoriesCommand::Delete { id } => {
            let category = find_category(&page, &id)?;
            page.open_delete(&category);
            follow(page.confirm_delete_category().await)?;
            settled(&page.delete_modal.state)?;
        }
    }

    render::categories(&page.categories);
    Ok(())
}

fn find_category(
    page: &SettingsPage,
    id: &str,
) -> Result<learnease_shared::models::category::Category> {
    page.categories
        .iter()
        .find(|c| c.id == id)
        .cloned()
        .with_context(|| format!("Category {} not found.", id))
}

async fn ai(client: ApiClient, command: AiCommand) -> Result<()> {
    let (source, action) = match command {
        AiCommand::Summarize(source) => (source, Action::Summary),
        AiCommand::Flashcards(source) => (source, Action::Flashcards),
        AiCommand::Notes(source) => (source, Action::StudyNotes),
    };

    let text = resolve_text(&client, source).await?;

    let mut page = BookViewerPage::new(client);
    if !page.open_context_menu(0, 0, &text) {
        bail!("Please select some text first.");
    }

    match action {
        Action::Summary => {
            follow(page.summarize_selection().await)?;
            settled(&page.summary.state)?;
            println!("{}", page.summary.result().map(String::as_str).unwrap_or_default());
        }
        Action::Flashcards => {
            follow(page.flashcards_from_selection().await)?;
            settled(&page.flashcards.state)?;
            render::flashcards(page.flashcards.result().map(Vec::as_slice).unwrap_or_default());
        }
        Action::StudyNotes => {
            follow(page.study_notes_from_selection().await)?;
            settled(&page.study_notes.state)?;
            println!("{}", page.study_notes.result().map(String::as_str).unwrap_or_default());
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Summary,
    Flashcards,
    StudyNotes,
}

async fn resolve_text(client: &ApiClient, source: TextSource) -> Result<String> {
    if let Some(text) = source.text {
        return Ok(text);
    }
    if let Some(path) = source.file {
        return tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    if let Some(book_id) = source.book {
        return Ok(client.book_extracted_text(&book_id).await?.content);
    }
    bail!("Provide --text, --file or --book")
}
