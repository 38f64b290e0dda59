use std::{env, fs::read_to_string, path::Path, process::exit, rc::Rc, time::Instant};

use scriptlang::{analyze, display_error, errors::errors::Error, evaluate, parse, tokenize};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        eprintln!("Usage: {} <script>", args.first().map(String::as_str).unwrap_or("scriptlang"));
        exit(2);
    }

    let file_path: &str = &args[1];
    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| file_path.to_string());

    let file_contents = match read_to_string(file_path) {
        Ok(contents) => contents,
        Err(error) => {
            eprintln!("Failed to read {}: {}", file_path, error);
            exit(1);
        }
    };

    let start = Instant::now();

    let tokens = tokenize(&file_contents, Some(file_name.clone()))
        .unwrap_or_else(|error| fail(error, file_path, &file_contents));
    println!("Tokenized in {:?}", start.elapsed());

    let parse_start = Instant::now();
    let mut ast = parse(tokens, Rc::new(file_name))
        .unwrap_or_else(|error| fail(error, file_path, &file_contents));
    println!("Parsed in {:?}", parse_start.elapsed());

    let analyze_start = Instant::now();
    analyze(&mut ast).unwrap_or_else(|error| fail(error, file_path, &file_contents));
    println!("Analyzed in {:?}", analyze_start.elapsed());

    let evaluate_start = Instant::now();
    let value = evaluate(&ast).unwrap_or_else(|error| fail(error, file_path, &file_contents));
    println!("Evaluated in {:?}", evaluate_start.elapsed());

    println!("main returned {}", value);
    println!("Total time: {:?}", start.elapsed());
}

fn fail(error: Error, file_path: &str, contents: &str) -> ! {
    display_error(&error, file_path, contents);
    exit(1);
}
