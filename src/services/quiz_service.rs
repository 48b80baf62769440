use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::dto::quiz_dto::{GenerateQuizPayload, InterviewQuizPayload};
use crate::error::{Error, Result};
use crate::generation::{Focus, GenerationRequest, QuizGenerator};
use crate::models::question::Question;
use crate::models::quiz::Quiz;
use crate::models::topic::Topic;

/// Quiz persistence plus the glue between HTTP payloads and the generator.
#[derive(Clone)]
pub struct QuizService {
    pool: PgPool,
    generator: QuizGenerator,
}

/// Fields of a quiz derived from the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizHeader {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub difficulty: String,
    pub question_type: String,
}

impl QuizHeader {
    pub fn for_request(request: &GenerationRequest) -> Self {
        let difficulty = request.level.difficulty().to_string();
        let (title, description, subject) = match &request.focus {
            Focus::Subject { subject, topic } => (
                format!("{} Quiz", topic),
                format!(
                    "Auto-generated {} quiz about {} in {}",
                    difficulty, topic, subject
                ),
                subject.clone(),
            ),
            Focus::Interview { job_role, category } => (
                format!("{} Quiz", request.subject_line()),
                format!(
                    "Auto-generated {} {} interview quiz for {}",
                    request.level, category, job_role
                ),
                job_role.to_string(),
            ),
        };
        Self {
            title,
            description,
            subject,
            difficulty,
            question_type: request.question_type.clone(),
        }
    }
}

impl QuizService {
    pub fn new(pool: PgPool, generator: QuizGenerator) -> Self {
        Self { pool, generator }
    }

    pub async fn generate_subject_quiz(
        &self,
        user_id: Uuid,
        payload: GenerateQuizPayload,
    ) -> Result<Quiz> {
        let request = GenerationRequest::subject(
            &payload.subject,
            &payload.topic,
            &payload.difficulty,
            payload.number_of_questions,
            payload.question_type.as_deref(),
        )?;
        self.generate_and_store(user_id, &request).await
    }

    pub async fn generate_interview_quiz(
        &self,
        user_id: Uuid,
        payload: InterviewQuizPayload,
    ) -> Result<Quiz> {
        let request = GenerationRequest::interview(
            &payload.job_role,
            &payload.level,
            &payload.category,
            payload.question_count,
        )?;
        self.generate_and_store(user_id, &request).await
    }

    /// Stored topic fields are free text, so they are validated here rather
    /// than when the topic was saved.
    pub async fn generate_topic_quiz(
        &self,
        user_id: Uuid,
        topic: &Topic,
        question_count: Option<usize>,
    ) -> Result<Quiz> {
        let request =
            GenerationRequest::interview(&topic.job_role, &topic.level, &topic.category, question_count)?;
        self.generate_and_store(user_id, &request).await
    }

    async fn generate_and_store(&self, user_id: Uuid, request: &GenerationRequest) -> Result<Quiz> {
        let questions = self.generator.generate(request).await?;
        let header = QuizHeader::for_request(request);
        let quiz = self.insert(user_id, &header, questions).await?;
        tracing::info!(
            quiz_id = %quiz.id,
            user_id = %user_id,
            questions = quiz.questions.0.len(),
            "quiz generated"
        );
        Ok(quiz)
    }

    async fn insert(&self, user_id: Uuid, header: &QuizHeader, questions: Vec<Question>) -> Result<Quiz> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            INSERT INTO quizzes (title, description, subject, difficulty, question_type, questions, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&header.title)
        .bind(&header.description)
        .bind(&header.subject)
        .bind(&header.difficulty)
        .bind(&header.question_type)
        .bind(Json(questions))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(quiz)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Quiz>> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            "SELECT * FROM quizzes WHERE created_by = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(quizzes)
    }

    /// 404 when missing, 403 when the quiz belongs to someone else.
    pub async fn get_for_user(&self, id: Uuid, user_id: Uuid) -> Result<Quiz> {
        let quiz = sqlx::query_as::<_, Quiz>("SELECT * FROM quizzes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Quiz not found".into()))?;

        if !quiz.is_owned_by(user_id) {
            return Err(Error::Forbidden("Not authorized to access this quiz".into()));
        }
        Ok(quiz)
    }

    pub async fn delete_for_user(&self, id: Uuid, user_id: Uuid) -> Result<()> {
        self.get_for_user(id, user_id).await?;
        sqlx::query("DELETE FROM quizzes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        tracing::info!(quiz_id = %id, user_id = %user_id, "quiz deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_header_follows_naming_convention() {
        let req = GenerationRequest::subject("Computer Science", "Graphs", "easy", Some(3), None).unwrap();
        let header = QuizHeader::for_request(&req);
        assert_eq!(header.title, "Graphs Quiz");
        assert_eq!(
            header.description,
            "Auto-generated easy quiz about Graphs in Computer Science"
        );
        assert_eq!(header.subject, "Computer Science");
        assert_eq!(header.question_type, "multiple_choice");
    }

    #[test]
    fn difficulty_is_normalized_from_level_aliases() {
        let req = GenerationRequest::subject("Math", "Sets", "Beginner", None, None).unwrap();
        assert_eq!(QuizHeader::for_request(&req).difficulty, "easy");
    }

    #[test]
    fn interview_header_names_role_and_category() {
        let req = GenerationRequest::interview("frontend developer", "advanced", "coding", None).unwrap();
        let header = QuizHeader::for_request(&req);
        assert_eq!(header.title, "Frontend Developer Coding Quiz");
        assert_eq!(header.subject, "Frontend Developer");
        assert_eq!(header.difficulty, "hard");
        assert!(header.description.contains("advanced Coding interview quiz"));
    }
}
