use data_loader::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data/movies_dataset.csv".to_string());

    println!("Loading movie catalog from {}...\n", path);

    let start = Instant::now();
    let catalog = Catalog::load_from_file(Path::new(&path))
        .expect("Failed to load dataset");
    let elapsed = start.elapsed();

    let with_genres = catalog
        .movies()
        .iter()
        .filter(|m| !m.genre_ids.is_empty())
        .count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("With genres: {}", with_genres);
    println!("\nPerformance: {:.0} movies/second",
             catalog.len() as f64 / elapsed.as_secs_f64());
}
