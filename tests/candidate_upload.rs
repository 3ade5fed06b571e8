use rust_xlsxwriter::Workbook;

use candidate_intake::candidates::{
    CandidateIntake, CandidatePatch, CandidateRepository, CandidateUpload,
    InMemoryCandidateRepository, UploadedFile,
};
use candidate_intake::types::Seniority;
use candidate_intake::{CandidateError, ValidationError};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

fn workbook(seniority: &str, years: f64, availability: bool) -> Vec<u8> {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "Seniority").unwrap();
    ws.write_string(0, 1, "Years").unwrap();
    ws.write_string(0, 2, "Availability").unwrap();
    ws.write_string(1, 0, seniority).unwrap();
    ws.write_number(1, 1, years).unwrap();
    ws.write_boolean(1, 2, availability).unwrap();
    wb.save_to_buffer().unwrap()
}

fn attachment(bytes: Vec<u8>) -> Option<UploadedFile> {
    Some(UploadedFile {
        file_name: "candidate.xlsx".to_string(),
        content_type: XLSX_MIME.to_string(),
        bytes,
    })
}

fn john() -> CandidateUpload {
    CandidateUpload {
        name: "John".to_string(),
        surname: "Doe".to_string(),
    }
}

#[test]
fn upload_merges_workbook_with_names() {
    let intake = CandidateIntake::new(InMemoryCandidateRepository::new());
    let candidate = intake
        .upload(john(), attachment(workbook("senior", 10.0, true)))
        .unwrap();

    assert_eq!(candidate.name, "John");
    assert_eq!(candidate.surname, "Doe");
    assert_eq!(candidate.seniority, Seniority::Senior);
    assert_eq!(candidate.years, 10);
    assert!(candidate.availability);
    assert_eq!(intake.repository().find_one(candidate.id).unwrap(), candidate);
}

#[test]
fn upload_without_file_is_rejected() {
    let intake = CandidateIntake::new(InMemoryCandidateRepository::new());
    let err = intake.upload(john(), None).unwrap_err();
    assert!(matches!(err, CandidateError::FileRequired));
    assert_eq!(err.to_string(), "Excel file is required");
}

#[test]
fn upload_with_wrong_content_type_is_rejected() {
    let intake = CandidateIntake::new(InMemoryCandidateRepository::new());
    let file = UploadedFile {
        file_name: "candidate.csv".to_string(),
        content_type: "text/csv".to_string(),
        bytes: b"seniority,years,availability\njunior,5,true\n".to_vec(),
    };
    let err = intake.upload(john(), Some(file)).unwrap_err();
    assert_eq!(err.to_string(), "Only Excel files (.xlsx, .xls) are allowed");
    assert!(err.is_bad_request());
}

#[test]
fn workbook_errors_pass_through_unchanged() {
    let intake = CandidateIntake::new(InMemoryCandidateRepository::new());
    let err = intake
        .upload(john(), attachment(workbook("senior", 51.0, true)))
        .unwrap_err();

    assert!(matches!(err, CandidateError::Workbook(ValidationError::Field(_))));
    assert_eq!(err.to_string(), "Years must be a number between 0 and 50");
    assert!(intake.repository().find_all().unwrap().is_empty());
}

#[test]
fn invalid_names_store_nothing() {
    let intake = CandidateIntake::new(InMemoryCandidateRepository::new());
    let upload = CandidateUpload {
        name: String::new(),
        surname: "Doe".to_string(),
    };
    let err = intake
        .upload(upload, attachment(workbook("junior", 1.0, false)))
        .unwrap_err();

    assert!(matches!(err, CandidateError::InvalidInput(_)));
    assert!(intake.repository().find_all().unwrap().is_empty());
}

#[test]
fn invalid_names_are_reported_before_the_workbook() {
    let intake = CandidateIntake::new(InMemoryCandidateRepository::new());
    let blank_name = || CandidateUpload {
        name: "   ".to_string(),
        surname: "Doe".to_string(),
    };

    let err = intake
        .upload(blank_name(), attachment(b"not an excel file".to_vec()))
        .unwrap_err();
    assert_eq!(err.to_string(), "name should not be empty");

    let err = intake.upload(blank_name(), None).unwrap_err();
    assert_eq!(err.to_string(), "name should not be empty");
}

#[test]
fn uploaded_candidate_supports_crud() {
    let intake = CandidateIntake::new(InMemoryCandidateRepository::new());
    let created = intake
        .upload(john(), attachment(workbook("junior", 2.9, false)))
        .unwrap();
    assert_eq!(created.years, 2);

    let repo = intake.repository();
    let updated = repo
        .update(
            created.id,
            CandidatePatch {
                availability: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
    assert!(updated.availability);
    assert_eq!(repo.find_all().unwrap(), vec![updated]);

    repo.remove(created.id).unwrap();
    let err = repo.find_one(created.id).unwrap_err();
    assert_eq!(err.to_string(), format!("Candidate with ID {} not found", created.id));
}
