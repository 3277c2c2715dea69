/// Course codes the backend accepts, with their full names.
pub const COURSES: [(&str, &str); 21] = [
    ("PSP", "Problem Solving and Programming"),
    ("OOP", "Object-Oriented Programming"),
    ("AOOP", "Advanced Object-Oriented Programming"),
    ("SE", "Software Engineering"),
    ("SAaT", "Software Analysis and Testing"),
    ("HCI", "Human-Computer Interaction"),
    ("DevOps", "DevOps"),
    ("IPD", "Innovative Product Development"),
    ("ML", "Machine Learning"),
    ("SPM", "Software Project Management"),
    ("DSA", "Data Structures and Algorithms"),
    ("IS", "Information Systems"),
    ("FCS", "Fundamentals of Computing Science"),
    ("FOS", "Foundations of Security"),
    ("SDCACPP", "Software Development With C and C++"),
    ("SEE", "Software Engineering Economics"),
    ("DB", "Database"),
    ("WAD", "Web Application Development"),
    ("MfC", "Mathematics of Computing"),
    ("BCPCN", "Basic Communications and PC Networking"),
    ("OTHER", "其他"),
];

/// Full course name, or the code itself when it is not in the table.
pub fn course_name(code: &str) -> &str {
    COURSES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(code, |(_, name)| *name)
}
