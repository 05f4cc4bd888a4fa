#![allow(clippy::expect_used, clippy::print_stdout)]

use urlbag::Url;

fn main() {
    // Parse a URL into its components
    let mut url = Url::parse(
        "https://john.doe@www.example.com:123/forum/questions/?tag=networking&order=newest#top",
    )
    .expect("Failed to parse URL");

    println!("Scheme: {:?}", url.scheme()); // Some("https")
    println!("Authority: {}", url.authority()); // john.doe@www.example.com:123
    println!("Path: {:?}", url.path().all()); // ["forum", "questions"]
    println!("Query: {}", url.query()); // ?tag=networking&order=newest
    println!("Fragment: {:?}", url.fragment()); // Some("top")
    println!();

    // Edit the path
    url.path_mut().append("archive");
    url.path_mut()
        .insert_before("questions", "all")
        .expect("segment exists");
    println!("Path: {}", url.path()); // /forum/all/questions/archive/
    println!();

    // Assemble the URL again
    println!("Raw: {}", url.raw().expect("scheme and host are set"));
    println!("Encoded: {}", url.encoded().expect("scheme and host are set"));
}
