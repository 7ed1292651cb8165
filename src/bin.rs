use std::env;

use stringcolumn_rs::{Error, StringColumn, DEFAULT_CLEANING_OPTIONS, DEFAULT_SEPARATOR};

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let path = args.next().ok_or_else(|| Error::InvalidConfiguration("usage: stringcolumn <path> [separator] [threshold]".to_string()))?;
    let separator = match args.next() {
        Some(s) if s.len() == 1 => s.as_bytes()[0],
        Some(s) => return Err(Error::InvalidParameter(format!("separator must be a single byte, got {:?}", s))),
        None => DEFAULT_SEPARATOR,
    };
    let mut opts = DEFAULT_CLEANING_OPTIONS;
    if let Some(threshold) = args.next() {
        opts.min_threshold = threshold.parse().map_err(|_| Error::InvalidParameter(format!("threshold must be a number, got {:?}", threshold)))?;
    }

    let mut column = StringColumn::from_csv(&path, separator)?;
    eprintln!("main: loaded {} records", column.len());
    column.lowercase();
    eprintln!("main: lowercased");
    column.strip_punctuation(Some(opts.punctuation));
    eprintln!("main: stripped punctuation");
    let candidates = column.identify_potential_stopwords(opts.min_threshold)?;
    eprintln!("main: {} potential stopwords", candidates.len());

    match serde_json::to_string_pretty(candidates) {
        Ok(report) => println!("{}", report),
        Err(e) => eprintln!("main: could not render report: {}", e),
    }

    Ok(())
}
