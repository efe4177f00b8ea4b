/// Plain-text output for command results

use learnease_client::pages::DashboardPage;
use learnease_shared::models::ai::Flashcard;
use learnease_shared::models::book::Book;
use learnease_shared::models::category::Category;
use learnease_shared::models::user::User;

pub fn user(user: &User) {
    println!("{} <{}>", user.display_name(), user.email);
    if let Some(age) = user.age {
        println!("  Age:        {}", age);
    }
    if let Some(university) = &user.university_name {
        println!("  University: {}", university);
    }
    if let Some(image) = &user.image {
        println!("  Image:      {}", image);
    }
    println!("  Verified:   {}", if user.verified { "yes" } else { "no" });
}

fn upload_date(book: &Book) -> String {
    book.uploaded_at()
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| book.upload_date.clone())
}

pub fn books(page: &DashboardPage) {
    let books = page.visible_books();
    if books.is_empty() {
        println!("No books found.");
        return;
    }

    for book in books {
        println!(
            "{}  {}  [{}]  {}",
            book.id,
            upload_date(book),
            page.category_name(book).unwrap_or("Uncategorized"),
            book.title
        );
    }
}

pub fn book(book: &Book, num_pages: usize) {
    println!("{}", book.title);
    println!("  Id:       {}", book.id);
    if let Some(filename) = &book.filename {
        println!("  File:     {}", filename);
    }
    println!("  Uploaded: {}", upload_date(book));
    println!("  Category: {}", book.category_id.as_deref().unwrap_or("none"));
    println!("  Pages:    {}", num_pages);
}

pub fn categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories yet.");
        return;
    }
    for category in categories {
        println!("{}  {}", category.id, category.name);
    }
}

pub fn flashcards(cards: &[Flashcard]) {
    for (i, card) in cards.iter().enumerate() {
        println!("{}. Q: {}", i + 1, card.front);
        println!("   A: {}", card.back);
    }
}
