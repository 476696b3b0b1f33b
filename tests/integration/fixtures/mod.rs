// Essay fixtures shared by integration tests
// WHY: Deterministic inputs with known paragraph and sentence structure

/// Five blank-line-separated paragraphs of four sentences each
pub const FIVE_BY_FOUR: &str = "\
Every school day begins with a choice about how to spend the morning. Some students rush in at the last minute. Others arrive early to prepare. The habits formed here shape the whole year.

Firstly, arriving early gives students time to review their notes. A short review improves recall during class. Teachers notice the difference in participation. Grades often follow that attention.

Secondly, early arrival builds friendships outside the classroom. Students talk about their weekends and their plans. These conversations create a sense of belonging. Belonging makes school feel less stressful.

Moreover, an early start reduces the chaos of the morning rush. Hallways are calm before the bell rings. Lockers can be opened without a crowd. Calm mornings lead to calmer days.

In conclusion, arriving early is a small habit with large rewards. It improves learning and strengthens friendships. It also makes mornings more peaceful. Every student should give it a try.";

/// The same essay pasted without blank lines, one line per sentence
pub fn five_by_four_without_blank_lines() -> String {
    FIVE_BY_FOUR
        .split("\n\n")
        .flat_map(|paragraph| {
            paragraph
                .split(". ")
                .map(|s| if s.ends_with('.') { s.to_string() } else { format!("{s}.") })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A paragraph containing dialogue and abbreviations
pub const DIALOGUE_PARAGRAPH: &str = "Dr. Reyes asked the class, \"Who read the chapter? Be honest.\" \
Nobody answered at first. Then Ms. Patel's student said 'I did.' The room relaxed.";

/// `count` numbered sentences joined by spaces in a single paragraph
pub fn numbered_sentences(count: usize) -> String {
    (1..=count)
        .map(|i| format!("Sentence number {i} makes a point."))
        .collect::<Vec<_>>()
        .join(" ")
}
