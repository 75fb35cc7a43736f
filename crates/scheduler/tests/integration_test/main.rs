/// End-to-end runs of the scheduler against real files: document
/// directories, the CSV corpus, the persisted model, and the report file.

mod helpers;
mod runs;
