pub mod answer_choice;
pub mod department;
pub mod survey;
pub mod survey_question;
pub mod survey_response;
pub mod survey_response_answer;
